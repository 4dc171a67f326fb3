use super::{InspectError, Snapshot};
use crate::invoke::{self, InstanceCache, TypeOrigin};
use crate::model::{CallResult, InstanceUse, InvocationRequest, InvocationResult, MemberCategory};
use crate::output::{self, DumpOptions, ListingOptions};
use crate::provider::{CallFrame, Component, ComponentRuntime, NativeComponent, system};

/// One inspection session: the loaded component, its snapshot, and the
/// instances created by invocations against it.
pub struct Session {
    component: Option<Box<dyn Component>>,
    snapshot: Option<Snapshot>,
    system: NativeComponent,
    instances: InstanceCache,
}

impl Session {
    pub fn new() -> Self {
        Self {
            component: None,
            snapshot: None,
            system: system::library(),
            instances: InstanceCache::new(),
        }
    }

    /// Enumerate the component's types and make it the session's subject.
    /// A previous snapshot and every cached instance are discarded.
    pub fn inspect(&mut self, component: Box<dyn Component>) -> Result<&Snapshot, InspectError> {
        let invalid = |source| InspectError::InvalidComponent {
            component: component.name().to_string(),
            source,
        };
        let types = component.types().map_err(invalid)?;
        let snapshot = Snapshot::build(component.name(), types).map_err(invalid)?;

        self.instances.clear();
        self.component = Some(component);
        Ok(self.snapshot.insert(snapshot))
    }

    pub fn snapshot(&self) -> Result<&Snapshot, InspectError> {
        self.snapshot.as_ref().ok_or(InspectError::NotInspected)
    }

    /// Display name of the inspected component, with its version.
    pub fn component_name(&self) -> Option<String> {
        self.component.as_ref().map(|c| c.display_name())
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn list_types(&self, options: &ListingOptions) -> Result<String, InspectError> {
        Ok(output::listing::types(self.snapshot()?, options))
    }

    pub fn list_members(
        &self,
        category: MemberCategory,
        options: &ListingOptions,
    ) -> Result<String, InspectError> {
        Ok(output::listing::members(self.snapshot()?, category, options))
    }

    pub fn dump(&self, options: &DumpOptions) -> Result<String, InspectError> {
        Ok(output::dump::dump(self.snapshot()?, options))
    }

    pub fn invoke(
        &mut self,
        request: &InvocationRequest,
    ) -> Result<InvocationResult, InspectError> {
        let snapshot = self.snapshot.as_ref().ok_or(InspectError::NotInspected)?;
        let component = self.component.as_deref().ok_or(InspectError::NotInspected)?;

        let (type_name, method_name) = invoke::split_method_name(&request.method)?;
        let target = invoke::resolve_type(type_name, snapshot, self.system.descriptors())?;
        let method = invoke::select_method(target.ty, method_name, request.arguments.len())?;
        if !method.is_static && target.ty.effective_abstract() {
            return Err(InspectError::CannotInstantiateAbstract(type_name.to_string()));
        }
        invoke::check_arity(&request.method, method, request.arguments.len())?;

        let runtime: &dyn ComponentRuntime = match target.origin {
            TypeOrigin::Component => component,
            TypeOrigin::System => &self.system,
        };
        let failed = |source| InspectError::InvocationFailed {
            method: request.method.clone(),
            source,
        };

        let (this, instance) = if method.is_static {
            (None, InstanceUse::Static)
        } else {
            let (this, usage) = self
                .instances
                .get_or_create(target.origin, target.ty, runtime)
                .map_err(failed)?;
            (Some(this), usage)
        };

        let mut values = Vec::with_capacity(request.arguments.len());
        let mut previews = Vec::with_capacity(request.arguments.len());
        let supplied = request.arguments.iter().zip(method.parameters());
        for (index, (raw, parameter)) in supplied.enumerate() {
            let value = invoke::coerce(raw, &parameter.parameter_type, snapshot).map_err(
                |source| InspectError::ArgumentConversionFailed {
                    argument: raw.clone(),
                    parameter: invoke::parameter_name(parameter, index),
                    target: parameter.parameter_type.name(),
                    source,
                },
            )?;
            values.push(value);
            previews.push(invoke::preview(raw, parameter, index));
        }

        let mut console = String::new();
        let mut frame = CallFrame {
            type_name: &target.ty.full_name,
            this,
            args: &values,
            console: &mut console,
        };
        let returned = runtime.call(target.ty, method, &mut frame).map_err(failed)?;
        let returns_void = method.value_type().is_none_or(|t| t.is_void());

        Ok(InvocationResult {
            type_name: type_name.to_string(),
            method_name: method_name.to_string(),
            instance,
            arguments: previews,
            console,
            result: if returns_void {
                CallResult::NoResult
            } else {
                CallResult::Returned(returned)
            },
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
