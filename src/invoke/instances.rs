use crate::model::{InstanceUse, TypeDescriptor};
use crate::provider::{ComponentRuntime, Instance, RuntimeError};
use std::any::Any;
use std::collections::HashMap;

/// Which runtime a resolved type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOrigin {
    Component,
    System,
}

/// One lazily created instance per type for the lifetime of a session.
#[derive(Default)]
pub struct InstanceCache {
    instances: HashMap<(TypeOrigin, String), Instance>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the cached instance of `ty`, constructing it on first use.
    pub fn get_or_create(
        &mut self,
        origin: TypeOrigin,
        ty: &TypeDescriptor,
        runtime: &dyn ComponentRuntime,
    ) -> Result<(&mut (dyn Any + 'static), InstanceUse), RuntimeError> {
        let key = (origin, ty.full_name.clone());
        let usage = if self.instances.contains_key(&key) {
            InstanceUse::Reused
        } else {
            let instance = runtime.construct(ty)?;
            self.instances.insert(key.clone(), instance);
            InstanceUse::Fresh
        };
        match self.instances.get_mut(&key) {
            Some(instance) => Ok((instance.as_mut(), usage)),
            None => Err(RuntimeError::MissingConstructor(ty.full_name.clone())),
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }
}
