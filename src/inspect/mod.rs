//! The inspection session: metadata cache, modifier classification and the
//! error taxonomy shared by listing, dumping and invocation.

mod modifiers;
mod session;
mod snapshot;

pub use modifiers::{Descriptor, Modifier, ModifierSet, member_modifiers, modifiers, type_modifiers};
pub use session::Session;
pub use snapshot::Snapshot;

use crate::invoke::CoercionError;
use crate::provider::{ProviderError, RuntimeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("No component has been loaded into the inspector. Call inspect first.")]
    NotInspected,

    #[error("Component '{component}' could not be enumerated: {source}")]
    InvalidComponent {
        component: String,
        #[source]
        source: ProviderError,
    },

    #[error("Invalid method name '{0}'. Expected TYPE.METHOD")]
    InvalidMethodName(String),

    #[error("Type '{0}' not found in component or system types")]
    TypeNotFound(String),

    #[error("Method '{method}' not found in type '{type_name}'")]
    MethodNotFound { method: String, type_name: String },

    #[error("No overload of '{method}' matches {arg_count} arguments")]
    AmbiguousOrNoOverload { method: String, arg_count: usize },

    #[error("Cannot create instance of abstract type '{0}'")]
    CannotInstantiateAbstract(String),

    #[error("Cannot convert '{argument}' to {target} for parameter '{parameter}': {source}")]
    ArgumentConversionFailed {
        argument: String,
        parameter: String,
        target: String,
        #[source]
        source: CoercionError,
    },

    #[error("Invocation of '{method}' failed: {source}")]
    InvocationFailed {
        method: String,
        #[source]
        source: RuntimeError,
    },
}
