//! Markup templates shared by listings and the dump tree.

use crate::inspect::member_modifiers;
use crate::model::{MemberDescriptor, MemberKind, TypeDescriptor};

pub const NONE_PRESENT: &str = "[tab][dim]None present[/][br]";
pub const INHERITED: &str = "[verbose](inherited) [/]";

pub const TYPES_SECTION: &str = "[br][dim]*[/] [purple]Types[/] [white]in component[/]:[br]";
pub const FIELDS_SECTION: &str = "[br][dim]*[/] [sky]Fields[/] [white]in component[/]:[br]";
pub const PROPERTIES_SECTION: &str = "[br][dim]*[/] [sky]Properties[/] [white]in component[/]:[br]";
pub const CONSTRUCTORS_SECTION: &str =
    "[br][dim]*[/] [purple]Constructors[/] [white]in component[/]:[br]";
pub const METHODS_SECTION: &str =
    "[br][dim]*[/] [teal]Methods[/] [white]in component[/]:[br][br]";
pub const DUMP_SECTION: &str =
    "[br][dim]*[/] [white]Component structure[/] [purple](declaration style)[/]:[br]";

pub fn type_header(full_name: &str) -> String {
    format!("[br][tab][purple]{}[/]:[br]", full_name)
}

/// `Type name, Type name` with styled types.
pub fn parameters(member: &MemberDescriptor) -> String {
    member
        .parameters()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "[pink]{}[/] {}",
                p.parameter_type.name(),
                crate::invoke::parameter_name(p, i)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn value_type(member: &MemberDescriptor) -> String {
    member
        .value_type()
        .map(|t| t.name())
        .unwrap_or_default()
}

pub fn field(member: &MemberDescriptor) -> String {
    format!(
        "[blue]{}[/] [pink]{}[/] [sky]{}[/][br]",
        member_modifiers(member),
        value_type(member),
        member.name
    )
}

pub fn property(member: &MemberDescriptor) -> String {
    let (can_read, can_write) = match &member.kind {
        MemberKind::Property {
            can_read,
            can_write,
            ..
        } => (*can_read, *can_write),
        _ => (false, false),
    };
    format!(
        "[blue]{}[/] [pink]{}[/] [sky]{}[/] {{[teal]{}[/]{}[teal]{}[/] }}[br]",
        member_modifiers(member),
        value_type(member),
        member.name,
        if can_read { " get" } else { "" },
        if can_read && can_write { ";" } else { "" },
        if can_write { " set" } else { "" },
    )
}

pub fn constructor(type_name: &str, member: &MemberDescriptor) -> String {
    format!(
        "[blue]{}[/] [purple]{}[/]({})[br]",
        member_modifiers(member),
        type_name,
        parameters(member)
    )
}

/// Method qualified by its type, as in flat method listings.
pub fn method(type_name: &str, member: &MemberDescriptor) -> String {
    format!(
        "[blue]{}[/] [pink]{}[/] [purple]{}[/].[teal]{}[/]({})[br]",
        member_modifiers(member),
        value_type(member),
        type_name,
        member.name,
        parameters(member)
    )
}

pub fn short_method(member: &MemberDescriptor) -> String {
    format!(
        "[blue]{}[/] [pink]{}[/] [teal]{}[/]({})[br]",
        member_modifiers(member),
        value_type(member),
        member.name,
        parameters(member)
    )
}

/// Type name coloured by what kind of type it is.
pub fn styled_type_name(ty: &TypeDescriptor) -> String {
    if ty.is_interface() {
        format!("[aqua]{}[/]", ty.name)
    } else if ty.is_value_type() {
        format!("[pink]{}[/]", ty.name)
    } else {
        format!("[purple]{}[/]", ty.name)
    }
}

pub fn inherited_prefix(member: &MemberDescriptor, ty: &TypeDescriptor) -> &'static str {
    if member.is_declared_by(ty) { "" } else { INHERITED }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, TypeRef};

    #[test]
    fn test_property_accessors() {
        let both = MemberDescriptor::property("Name", TypeRef::new("System.String"), true, true);
        assert_eq!(
            property(&both),
            "[blue]public[/] [pink]String[/] [sky]Name[/] {[teal] get[/];[teal] set[/] }[br]"
        );
        let read = MemberDescriptor::property("Id", TypeRef::new("System.Int32"), true, false);
        assert_eq!(
            property(&read),
            "[blue]public[/] [pink]Int32[/] [sky]Id[/] {[teal] get[/][teal][/] }[br]"
        );
    }

    #[test]
    fn test_method_templates() {
        let m = MemberDescriptor::method(
            "SetStatus",
            vec![Parameter::new("value", TypeRef::new("System.Int32"))],
            TypeRef::new("System.String"),
        );
        assert_eq!(
            method("Device", &m),
            "[blue]public[/] [pink]String[/] [purple]Device[/].[teal]SetStatus[/]\
             ([pink]Int32[/] value)[br]"
        );
        assert_eq!(
            short_method(&m),
            "[blue]public[/] [pink]String[/] [teal]SetStatus[/]([pink]Int32[/] value)[br]"
        );
    }
}
