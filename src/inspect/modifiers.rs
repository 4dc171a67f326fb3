//! Normalized modifier sets for types and members.

use crate::model::{Dispatch, MemberDescriptor, MemberKind, TypeDescriptor, Visibility};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
    Static,
    Abstract,
    Sealed,
    Virtual,
    Readonly,
    Const,
    Interface,
    Enum,
    Struct,
    Delegate,
    Class,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::ProtectedInternal => "protected internal",
            Modifier::Static => "static",
            Modifier::Abstract => "abstract",
            Modifier::Sealed => "sealed",
            Modifier::Virtual => "virtual",
            Modifier::Readonly => "readonly",
            Modifier::Const => "const",
            Modifier::Interface => "interface",
            Modifier::Enum => "enum",
            Modifier::Struct => "struct",
            Modifier::Delegate => "delegate",
            Modifier::Class => "class",
        }
    }
}

impl From<Visibility> for Modifier {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Modifier::Public,
            Visibility::Private => Modifier::Private,
            Visibility::Protected => Modifier::Protected,
            Visibility::Internal => Modifier::Internal,
            Visibility::ProtectedInternal => Modifier::ProtectedInternal,
        }
    }
}

/// Ordered modifier tokens: visibility, then shape, then kind-specific.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet(Vec<Modifier>);

impl ModifierSet {
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_if(&mut self, condition: bool, modifier: Modifier) {
        if condition {
            self.0.push(modifier);
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.0.iter().map(|m| m.as_str()).collect();
        f.write_str(&tokens.join(" "))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Descriptor<'a> {
    Type(&'a TypeDescriptor),
    Member(&'a MemberDescriptor),
}

pub fn modifiers(descriptor: Descriptor<'_>) -> ModifierSet {
    match descriptor {
        Descriptor::Type(ty) => type_modifiers(ty),
        Descriptor::Member(member) => member_modifiers(member),
    }
}

pub fn type_modifiers(ty: &TypeDescriptor) -> ModifierSet {
    let mut set = ModifierSet::default();
    set.0.push(ty.visibility.into());

    if ty.is_static() {
        set.0.push(Modifier::Static);
    } else if ty.effective_abstract() && !ty.is_interface() {
        set.0.push(Modifier::Abstract);
    } else if ty.effective_sealed() && !ty.is_value_type() {
        set.0.push(Modifier::Sealed);
    }

    let kind = if ty.is_interface() {
        Modifier::Interface
    } else if ty.is_enum() {
        Modifier::Enum
    } else if ty.is_value_type() {
        Modifier::Struct
    } else if ty.is_delegate() {
        Modifier::Delegate
    } else {
        Modifier::Class
    };
    set.0.push(kind);
    set
}

pub fn member_modifiers(member: &MemberDescriptor) -> ModifierSet {
    let mut set = ModifierSet::default();
    set.0.push(member.visibility.into());

    match &member.kind {
        MemberKind::Constructor { .. } => {}
        MemberKind::Field {
            is_readonly,
            is_const,
            ..
        } => {
            set.push_if(member.is_static, Modifier::Static);
            set.push_if(*is_readonly, Modifier::Readonly);
            set.push_if(*is_const, Modifier::Const);
        }
        MemberKind::Property { dispatch, .. } | MemberKind::Method { dispatch, .. } => {
            set.push_if(member.is_static, Modifier::Static);
            match dispatch {
                Dispatch::Abstract => set.0.push(Modifier::Abstract),
                Dispatch::Virtual => set.0.push(Modifier::Virtual),
                Dispatch::Direct | Dispatch::Final => {}
            }
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MULTICAST_DELEGATE_TYPE, TypeKind, TypeRef};

    fn ty(kind: TypeKind) -> TypeDescriptor {
        TypeDescriptor::new(kind, Some("App"), "T")
    }

    #[test]
    fn test_type_shapes() {
        let mut static_class = ty(TypeKind::Class);
        static_class.is_abstract = true;
        static_class.is_sealed = true;
        assert_eq!(type_modifiers(&static_class).to_string(), "public static class");

        let mut abstract_class = ty(TypeKind::Class);
        abstract_class.is_abstract = true;
        assert_eq!(type_modifiers(&abstract_class).to_string(), "public abstract class");

        let mut sealed = ty(TypeKind::Class);
        sealed.is_sealed = true;
        sealed.visibility = Visibility::Internal;
        assert_eq!(type_modifiers(&sealed).to_string(), "internal sealed class");

        assert_eq!(type_modifiers(&ty(TypeKind::Interface)).to_string(), "public interface");
        assert_eq!(type_modifiers(&ty(TypeKind::Enum)).to_string(), "public enum");
        assert_eq!(type_modifiers(&ty(TypeKind::Struct)).to_string(), "public struct");
    }

    #[test]
    fn test_delegate_is_sealed_delegate() {
        let mut delegate = ty(TypeKind::Class);
        delegate.is_sealed = true;
        delegate.base = Some(TypeRef::new(MULTICAST_DELEGATE_TYPE));
        let set = type_modifiers(&delegate);
        assert_eq!(set.to_string(), "public sealed delegate");
        assert!(!set.contains(Modifier::Class));
    }

    #[test]
    fn test_nested_visibility() {
        let mut nested = ty(TypeKind::Class);
        nested.visibility = Visibility::ProtectedInternal;
        assert_eq!(type_modifiers(&nested).to_string(), "protected internal class");
    }

    #[test]
    fn test_member_modifiers() {
        let field = MemberDescriptor::field("Max", TypeRef::new("System.Int32")).constant();
        assert_eq!(member_modifiers(&field).to_string(), "public static const");

        let readonly = MemberDescriptor::field("_id", TypeRef::new("System.Int32"))
            .with_visibility(Visibility::Private)
            .readonly();
        assert_eq!(member_modifiers(&readonly).to_string(), "private readonly");

        let method = MemberDescriptor::method("Area", vec![], TypeRef::new("System.Double"))
            .with_visibility(Visibility::Protected)
            .with_dispatch(Dispatch::Abstract);
        assert_eq!(member_modifiers(&method).to_string(), "protected abstract");

        let sealed_override =
            MemberDescriptor::method("TurnOn", vec![], TypeRef::new("System.Void"))
                .with_dispatch(Dispatch::Final);
        assert_eq!(member_modifiers(&sealed_override).to_string(), "public");

        let ctor = MemberDescriptor::constructor(vec![]).as_static();
        assert_eq!(
            modifiers(Descriptor::Member(&ctor)).to_string(),
            "public",
            "constructors never show static"
        );
    }

    #[test]
    fn test_property_uses_accessor_shape() {
        let prop = MemberDescriptor::property("Count", TypeRef::new("System.Int32"), true, false)
            .as_static()
            .with_dispatch(Dispatch::Virtual);
        assert_eq!(member_modifiers(&prop).to_string(), "public static virtual");
    }
}
