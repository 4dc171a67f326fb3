use serde::{Deserialize, Serialize};
use std::fmt;

pub const OBJECT_TYPE: &str = "System.Object";
pub const VALUE_TYPE: &str = "System.ValueType";
pub const ENUM_TYPE: &str = "System.Enum";
pub const MULTICAST_DELEGATE_TYPE: &str = "System.MulticastDelegate";
pub const VOID_TYPE: &str = "System.Void";
pub const STRING_TYPE: &str = "System.String";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
}

/// How a method (or property accessor) is dispatched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    #[default]
    Direct,
    Virtual,
    /// Virtual but sealed against further overriding.
    Final,
    Abstract,
}

/// Reference to a type by name, which may live outside the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub full_name: String,
    /// Set when this reference is a nullable wrapper around `underlying`.
    pub underlying: Option<Box<TypeRef>>,
    /// Interfaces the referenced type itself implements.
    pub interfaces: Vec<String>,
}

impl TypeRef {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            underlying: None,
            interfaces: Vec::new(),
        }
    }

    pub fn nullable(underlying: TypeRef) -> Self {
        Self {
            full_name: "System.Nullable`1".to_string(),
            underlying: Some(Box::new(underlying)),
            interfaces: Vec::new(),
        }
    }

    /// Parse a textual reference; a trailing `?` denotes a nullable wrapper.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.strip_suffix('?') {
            Some(inner) => Self::nullable(Self::new(inner)),
            None => Self::new(text),
        }
    }

    pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    /// Short display name, e.g. `Int32` for `System.Int32`.
    pub fn name(&self) -> String {
        match &self.underlying {
            Some(inner) => format!("{}?", inner.name()),
            None => simple_name(&self.full_name).to_string(),
        }
    }

    pub fn is(&self, full_name: &str) -> bool {
        self.underlying.is_none() && self.full_name == full_name
    }

    pub fn is_void(&self) -> bool {
        self.is(VOID_TYPE)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.underlying {
            Some(inner) => write!(f, "{}?", inner),
            None => f.write_str(&self.full_name),
        }
    }
}

/// Last `.` or `+` separated segment, ignoring generic argument brackets.
pub fn simple_name(full_name: &str) -> &str {
    let head = full_name.split('[').next().unwrap_or(full_name);
    let start = head.rfind(['.', '+']).map(|i| i + 1).unwrap_or(0);
    &full_name[start..]
}

/// Where a member was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaringType {
    /// A type present in the current snapshot.
    Snapshot(String),
    /// Inherited from a type outside the snapshot (system or base types).
    External(String),
}

impl DeclaringType {
    pub fn full_name(&self) -> &str {
        match self {
            DeclaringType::Snapshot(name) | DeclaringType::External(name) => name,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, DeclaringType::External(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    pub parameter_type: TypeRef,
}

impl Parameter {
    pub fn new(name: &str, parameter_type: TypeRef) -> Self {
        Self {
            name: Some(name.to_string()),
            parameter_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Field {
        field_type: TypeRef,
        is_readonly: bool,
        is_const: bool,
    },
    /// Visibility, static flag and dispatch of a property describe its
    /// primary accessor (the getter, else the setter).
    Property {
        property_type: TypeRef,
        can_read: bool,
        can_write: bool,
        dispatch: Dispatch,
    },
    Constructor {
        parameters: Vec<Parameter>,
    },
    Method {
        parameters: Vec<Parameter>,
        return_type: TypeRef,
        dispatch: Dispatch,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCategory {
    Field,
    Property,
    Constructor,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub declaring_type: DeclaringType,
    pub visibility: Visibility,
    pub is_static: bool,
    pub kind: MemberKind,
}

impl MemberDescriptor {
    fn new(name: &str, kind: MemberKind) -> Self {
        Self {
            name: name.to_string(),
            declaring_type: DeclaringType::Snapshot(String::new()),
            visibility: Visibility::Public,
            is_static: false,
            kind,
        }
    }

    pub fn field(name: &str, field_type: TypeRef) -> Self {
        Self::new(
            name,
            MemberKind::Field {
                field_type,
                is_readonly: false,
                is_const: false,
            },
        )
    }

    pub fn property(name: &str, property_type: TypeRef, can_read: bool, can_write: bool) -> Self {
        Self::new(
            name,
            MemberKind::Property {
                property_type,
                can_read,
                can_write,
                dispatch: Dispatch::Direct,
            },
        )
    }

    pub fn constructor(parameters: Vec<Parameter>) -> Self {
        Self::new(".ctor", MemberKind::Constructor { parameters })
    }

    pub fn method(name: &str, parameters: Vec<Parameter>, return_type: TypeRef) -> Self {
        Self::new(
            name,
            MemberKind::Method {
                parameters,
                return_type,
                dispatch: Dispatch::Direct,
            },
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_dispatch(mut self, value: Dispatch) -> Self {
        match &mut self.kind {
            MemberKind::Property { dispatch, .. } | MemberKind::Method { dispatch, .. } => {
                *dispatch = value
            }
            MemberKind::Field { .. } | MemberKind::Constructor { .. } => {}
        }
        self
    }

    pub fn readonly(mut self) -> Self {
        if let MemberKind::Field { is_readonly, .. } = &mut self.kind {
            *is_readonly = true;
        }
        self
    }

    /// Compile-time literal; literals are always static.
    pub fn constant(mut self) -> Self {
        if let MemberKind::Field { is_const, .. } = &mut self.kind {
            *is_const = true;
            self.is_static = true;
        }
        self
    }

    pub fn inherited_from(mut self, full_name: &str) -> Self {
        self.declaring_type = DeclaringType::External(full_name.to_string());
        self
    }

    pub fn category(&self) -> MemberCategory {
        match self.kind {
            MemberKind::Field { .. } => MemberCategory::Field,
            MemberKind::Property { .. } => MemberCategory::Property,
            MemberKind::Constructor { .. } => MemberCategory::Constructor,
            MemberKind::Method { .. } => MemberCategory::Method,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Constructor { parameters } | MemberKind::Method { parameters, .. } => {
                parameters
            }
            MemberKind::Field { .. } | MemberKind::Property { .. } => &[],
        }
    }

    /// Field/property type or method return type.
    pub fn value_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            MemberKind::Field { field_type, .. } => Some(field_type),
            MemberKind::Property { property_type, .. } => Some(property_type),
            MemberKind::Method { return_type, .. } => Some(return_type),
            MemberKind::Constructor { .. } => None,
        }
    }

    pub fn is_declared_by(&self, ty: &TypeDescriptor) -> bool {
        !self.declaring_type.is_external() && self.declaring_type.full_name() == ty.full_name
    }

    /// Signature key used to bind method bodies, e.g. `SetStatus(System.Int32)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters()
            .iter()
            .map(|p| p.parameter_type.to_string())
            .collect();
        format!("{}({})", self.name, params.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub namespace: Option<String>,
    pub name: String,
    /// Qualified name; nested types use `Outer+Inner`.
    pub full_name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub base: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub members: Vec<MemberDescriptor>,
    pub nested: Vec<TypeDescriptor>,
    pub enum_values: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind, namespace: Option<&str>, name: &str) -> Self {
        let full_name = match namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
            _ => name.to_string(),
        };
        let base = match kind {
            TypeKind::Class => Some(TypeRef::new(OBJECT_TYPE)),
            TypeKind::Struct => Some(TypeRef::new(VALUE_TYPE)),
            TypeKind::Enum => Some(TypeRef::new(ENUM_TYPE)),
            TypeKind::Delegate => Some(TypeRef::new(MULTICAST_DELEGATE_TYPE)),
            TypeKind::Interface => None,
        };
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            name: name.to_string(),
            full_name,
            kind,
            visibility: Visibility::Public,
            is_abstract: false,
            is_sealed: false,
            base,
            interfaces: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// Re-root this type (and its nested types and declared members) under `parent`.
    pub fn nest_under(&mut self, parent: &TypeDescriptor) {
        self.reparent(parent.namespace.clone(), &parent.full_name);
    }

    fn reparent(&mut self, namespace: Option<String>, parent_full_name: &str) {
        let previous = std::mem::take(&mut self.full_name);
        self.namespace = namespace;
        self.full_name = format!("{}+{}", parent_full_name, self.name);
        self.claim_members(&previous);
        for nested in &mut self.nested {
            nested.reparent(self.namespace.clone(), &self.full_name);
        }
    }

    /// Point every non-external member declared by `previous` (or unset) at this type.
    pub fn claim_members(&mut self, previous: &str) {
        for member in &mut self.members {
            let claim = match &member.declaring_type {
                DeclaringType::Snapshot(name) => name.is_empty() || name == previous,
                DeclaringType::External(_) => false,
            };
            if claim {
                member.declaring_type = DeclaringType::Snapshot(self.full_name.clone());
            }
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn is_delegate(&self) -> bool {
        self.kind == TypeKind::Delegate
            || (self.kind == TypeKind::Class
                && self.is_sealed
                && self
                    .base
                    .as_ref()
                    .is_some_and(|b| b.is(MULTICAST_DELEGATE_TYPE)))
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class && !self.is_delegate()
    }

    /// Interfaces are implicitly abstract.
    pub fn effective_abstract(&self) -> bool {
        self.is_abstract || self.is_interface()
    }

    /// Value types and delegates are implicitly sealed.
    pub fn effective_sealed(&self) -> bool {
        self.is_sealed
            || matches!(
                self.kind,
                TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate
            )
    }

    /// Abstract and sealed together means a static class.
    pub fn is_static(&self) -> bool {
        self.effective_abstract() && self.effective_sealed()
    }

    pub fn members_of(&self, category: MemberCategory) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(move |m| m.category() == category)
    }

    /// Methods called `name`. Items borrow from `self` only.
    pub fn methods_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a MemberDescriptor> + use<'a, 'n> {
        self.members_of(MemberCategory::Method)
            .filter(move |m| m.name == name)
    }

    /// The delegate's `Invoke` method, which carries its signature.
    pub fn delegate_invoke(&self) -> Option<&MemberDescriptor> {
        self.methods_named("Invoke").next()
    }
}
