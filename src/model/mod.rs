mod descriptor;
mod value;

pub use descriptor::{
    DeclaringType, Dispatch, ENUM_TYPE, MULTICAST_DELEGATE_TYPE, MemberCategory, MemberDescriptor,
    MemberKind, OBJECT_TYPE, Parameter, STRING_TYPE, TypeDescriptor, TypeKind, TypeRef, VALUE_TYPE,
    VOID_TYPE, Visibility, simple_name,
};
pub use value::Value;

/// A method call to perform against the inspected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// `TypeName.MethodName`; the type name may itself contain dots.
    pub method: String,
    pub arguments: Vec<String>,
}

impl InvocationRequest {
    pub fn new<I, S>(method: &str, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.to_string(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether an invocation ran against an instance, and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceUse {
    Static,
    Fresh,
    Reused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentPreview {
    pub type_name: String,
    pub parameter_name: String,
    /// Coerced value as shown to the user (strings quoted, chars in single quotes).
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    Returned(Value),
    /// The method returns void.
    NoResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult {
    pub type_name: String,
    pub method_name: String,
    pub instance: InstanceUse,
    pub arguments: Vec<ArgumentPreview>,
    /// Console output written by the invoked method.
    pub console: String,
    pub result: CallResult,
}
