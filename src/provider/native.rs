//! Components described and implemented in Rust.
//!
//! Types are declared with [`TypeBuilder`]; method bodies are plain functions
//! bound to a method signature, and parameterless constructors produce boxed
//! instances that the session caches.

use super::{
    CallFrame, Component, ComponentRuntime, Instance, MetadataProvider, ProviderError,
    RuntimeError, system,
};
use crate::model::{
    MemberDescriptor, TypeDescriptor, TypeKind, TypeRef, Value, Visibility,
};
use std::collections::HashMap;

pub type NativeFn = fn(&mut CallFrame<'_>) -> Result<Value, RuntimeError>;
pub type NativeConstructor = fn() -> Instance;

pub struct TypeBuilder {
    desc: TypeDescriptor,
    constructor: Option<NativeConstructor>,
    bodies: Vec<(String, NativeFn)>,
    nested: Vec<TypeBuilder>,
}

impl TypeBuilder {
    pub fn new(kind: TypeKind, namespace: Option<&str>, name: &str) -> Self {
        Self {
            desc: TypeDescriptor::new(kind, namespace, name),
            constructor: None,
            bodies: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(TypeKind::Class, Some(namespace), name)
    }

    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(TypeKind::Interface, Some(namespace), name).abstract_type()
    }

    pub fn enumeration(namespace: &str, name: &str) -> Self {
        Self::new(TypeKind::Enum, Some(namespace), name).sealed()
    }

    pub fn delegate(namespace: &str, name: &str) -> Self {
        Self::new(TypeKind::Delegate, Some(namespace), name).sealed()
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.desc.visibility = visibility;
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.desc.is_abstract = true;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.desc.is_sealed = true;
        self
    }

    /// `static class`: abstract and sealed.
    pub fn static_class(self) -> Self {
        self.abstract_type().sealed()
    }

    pub fn base(mut self, base: Option<TypeRef>) -> Self {
        self.desc.base = base;
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.desc.interfaces.push(interface);
        self
    }

    pub fn enum_values(mut self, values: &[&str]) -> Self {
        self.desc.enum_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn member(mut self, mut member: MemberDescriptor) -> Self {
        if !member.declaring_type.is_external() {
            member.declaring_type =
                crate::model::DeclaringType::Snapshot(self.desc.full_name.clone());
        }
        self.desc.members.push(member);
        self
    }

    /// Declare a method and bind its body.
    pub fn method(mut self, member: MemberDescriptor, body: NativeFn) -> Self {
        self.bodies.push((member.signature(), body));
        self.member(member)
    }

    /// Declare a public parameterless constructor.
    pub fn constructor(mut self, create: NativeConstructor) -> Self {
        self.constructor = Some(create);
        self.member(MemberDescriptor::constructor(Vec::new()))
    }

    pub fn nested(mut self, nested: TypeBuilder) -> Self {
        self.nested.push(nested);
        self
    }

    fn finish(
        self,
        parent: Option<&TypeDescriptor>,
        constructors: &mut HashMap<String, NativeConstructor>,
        bodies: &mut HashMap<String, NativeFn>,
    ) -> TypeDescriptor {
        let mut desc = self.desc;
        if let Some(parent) = parent {
            desc.nest_under(parent);
        }
        if desc.kind == TypeKind::Enum {
            add_enum_fields(&mut desc);
        }
        if let Some(create) = self.constructor {
            constructors.insert(desc.full_name.clone(), create);
        }
        for (signature, body) in self.bodies {
            bodies.insert(body_key(&desc.full_name, &signature), body);
        }
        for nested in self.nested {
            let child = nested.finish(Some(&desc), constructors, bodies);
            desc.nested.push(child);
        }
        desc
    }
}

/// Reflection over an enum shows its backing field and one literal per value.
pub(super) fn add_enum_fields(desc: &mut TypeDescriptor) {
    let own = TypeRef::new(desc.full_name.clone());
    let declaring = crate::model::DeclaringType::Snapshot(desc.full_name.clone());
    let mut fields = vec![MemberDescriptor::field("value__", TypeRef::new("System.Int32"))];
    fields.extend(
        desc.enum_values
            .iter()
            .map(|v| MemberDescriptor::field(v, own.clone()).constant()),
    );
    for field in fields.iter_mut() {
        field.declaring_type = declaring.clone();
    }
    desc.members.splice(0..0, fields);
}

fn body_key(type_name: &str, signature: &str) -> String {
    format!("{}::{}", type_name, signature)
}

pub struct NativeComponentBuilder {
    name: String,
    version: String,
    types: Vec<TypeBuilder>,
}

impl NativeComponentBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: "1.0.0.0".to_string(),
            types: Vec::new(),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn ty(mut self, ty: TypeBuilder) -> Self {
        self.types.push(ty);
        self
    }

    pub fn build(self) -> NativeComponent {
        let mut constructors = HashMap::new();
        let mut bodies = HashMap::new();
        let types = self
            .types
            .into_iter()
            .map(|t| t.finish(None, &mut constructors, &mut bodies))
            .collect();
        NativeComponent {
            name: self.name,
            version: self.version,
            types,
            constructors,
            bodies,
        }
    }
}

pub struct NativeComponent {
    name: String,
    version: String,
    types: Vec<TypeDescriptor>,
    constructors: HashMap<String, NativeConstructor>,
    bodies: HashMap<String, NativeFn>,
}

impl NativeComponent {
    /// Descriptors without cloning them.
    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.types
    }

    fn body_for(&self, ty: &TypeDescriptor, method: &MemberDescriptor) -> Option<NativeFn> {
        let signature = method.signature();
        let declaring = method.declaring_type.full_name();
        self.bodies
            .get(&body_key(&ty.full_name, &signature))
            .or_else(|| self.bodies.get(&body_key(declaring, &signature)))
            .copied()
            .or_else(|| system::inherited_body(declaring, &signature))
    }
}

impl MetadataProvider for NativeComponent {
    fn types(&self) -> Result<Vec<TypeDescriptor>, ProviderError> {
        Ok(self.types.clone())
    }
}

impl ComponentRuntime for NativeComponent {
    fn construct(&self, ty: &TypeDescriptor) -> Result<Instance, RuntimeError> {
        let create = self
            .constructors
            .get(&ty.full_name)
            .ok_or_else(|| RuntimeError::MissingConstructor(ty.full_name.clone()))?;
        Ok(create())
    }

    fn call(
        &self,
        ty: &TypeDescriptor,
        method: &MemberDescriptor,
        frame: &mut CallFrame<'_>,
    ) -> Result<Value, RuntimeError> {
        let body = self.body_for(ty, method).ok_or_else(|| {
            RuntimeError::MissingBody(format!("{}.{}", ty.full_name, method.signature()))
        })?;
        body(frame)
    }
}

impl Component for NativeComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> String {
        format!("{}, Version={}", self.name, self.version)
    }
}
