//! Per-kind listings of the snapshot: types, fields, properties,
//! constructors and methods.

use super::markup;
use crate::inspect::Snapshot;
use crate::model::{MemberCategory, MemberDescriptor, TypeDescriptor, Visibility};

/// Which members of a type are visible to a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Discovery {
    /// Declared and inherited members; inherited ones are tagged.
    #[default]
    All,
    DeclaredOnly,
}

impl Discovery {
    pub(super) fn admits(self, member: &MemberDescriptor, ty: &TypeDescriptor) -> bool {
        self == Discovery::All || member.is_declared_by(ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// A header per type, members indented beneath it.
    Grouped,
    /// One line per member, qualified by its type where the template allows.
    Flat,
}

impl Grouping {
    pub fn default_for(category: MemberCategory) -> Self {
        match category {
            MemberCategory::Method => Grouping::Flat,
            _ => Grouping::Grouped,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    pub discovery: Discovery,
    /// `None` uses the default for the listed kind.
    pub grouping: Option<Grouping>,
}

fn visible<'a>(
    ty: &'a TypeDescriptor,
    category: MemberCategory,
    discovery: Discovery,
) -> Vec<&'a MemberDescriptor> {
    ty.members_of(category)
        .filter(|m| discovery.admits(m, ty))
        .collect()
}

fn section_header(category: MemberCategory) -> &'static str {
    match category {
        MemberCategory::Field => markup::FIELDS_SECTION,
        MemberCategory::Property => markup::PROPERTIES_SECTION,
        MemberCategory::Constructor => markup::CONSTRUCTORS_SECTION,
        MemberCategory::Method => markup::METHODS_SECTION,
    }
}

fn member_line(ty: &TypeDescriptor, member: &MemberDescriptor) -> String {
    let body = match member.category() {
        MemberCategory::Field => markup::field(member),
        MemberCategory::Property => markup::property(member),
        MemberCategory::Constructor => markup::constructor(&ty.name, member),
        MemberCategory::Method => markup::method(&ty.name, member),
    };
    format!("{}{}", markup::inherited_prefix(member, ty), body)
}

/// List every member of `category`, type by type.
pub fn members(snapshot: &Snapshot, category: MemberCategory, options: &ListingOptions) -> String {
    let grouping = options
        .grouping
        .unwrap_or_else(|| Grouping::default_for(category));
    let mut out = String::from(section_header(category));
    let mut displayed = false;

    for ty in snapshot.types() {
        let members = visible(ty, category, options.discovery);
        if members.is_empty() {
            continue;
        }
        if grouping == Grouping::Grouped {
            out.push_str(&markup::type_header(&ty.full_name));
        }
        for member in members {
            out.push_str(match grouping {
                Grouping::Grouped => "[tab][tab]",
                Grouping::Flat => "[tab]",
            });
            out.push_str(&member_line(ty, member));
        }
        displayed = true;
    }

    if !displayed {
        out.push_str(markup::NONE_PRESENT);
    }
    out
}

fn details(ty: &TypeDescriptor) -> String {
    let is_static = ty.is_static();
    let base = ty
        .base
        .as_ref()
        .map(|b| b.full_name.as_str())
        .unwrap_or("None");
    let flags = [
        ("Is Public", ty.visibility == Visibility::Public),
        ("Is Internal", ty.visibility != Visibility::Public),
        ("Is Class", ty.is_class()),
        ("Is Interface", ty.is_interface()),
        ("Is Abstract", ty.effective_abstract() && !is_static),
        ("Is Sealed", ty.effective_sealed() && !is_static),
        ("Is Static", is_static),
        ("Is ValueType", ty.is_value_type()),
        ("Is Enum", ty.is_enum()),
    ];
    let mut out: String = flags
        .iter()
        .map(|(label, value)| format!("[tab][tab]{}: [blue]{}[/][br]", label, value))
        .collect();
    out.push_str(&format!("[tab][tab]Base Type: [pink]{}[/][br]", base));
    out
}

/// Every type with its modifier breakdown, interfaces and members inline.
pub fn types(snapshot: &Snapshot, options: &ListingOptions) -> String {
    let mut out = String::from(markup::TYPES_SECTION);
    if snapshot.is_empty() {
        out.push_str(markup::NONE_PRESENT);
        return out;
    }

    for ty in snapshot.types() {
        out.push_str(&markup::type_header(&ty.full_name));
        out.push_str(&details(ty));

        if !ty.interfaces.is_empty() {
            out.push_str("[tab][tab]Implemented Interfaces:[br]");
            for interface in &ty.interfaces {
                out.push_str(&format!("[tab][tab][tab][purple]{}[/][br]", interface.full_name));
            }
        }

        let sections = [
            (MemberCategory::Field, "Fields"),
            (MemberCategory::Property, "Properties"),
            (MemberCategory::Constructor, "Constructors"),
            (MemberCategory::Method, "Methods"),
        ];
        for (category, title) in sections {
            let members = visible(ty, category, options.discovery);
            if members.is_empty() {
                continue;
            }
            out.push_str(&format!("[tab][tab]{}:[br]", title));
            for member in members {
                let body = match category {
                    MemberCategory::Field => markup::field(member),
                    MemberCategory::Property => markup::property(member),
                    MemberCategory::Constructor => markup::constructor(&ty.name, member),
                    MemberCategory::Method => markup::short_method(member),
                };
                out.push_str("[tab][tab][tab]");
                out.push_str(markup::inherited_prefix(member, ty));
                out.push_str(&body);
            }
        }
    }
    out
}
