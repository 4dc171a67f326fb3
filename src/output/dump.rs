//! Declaration-style tree of the whole component, grouped by namespace.

use super::listing::Discovery;
use super::markup;
use crate::inspect::{Snapshot, type_modifiers};
use crate::model::{
    ENUM_TYPE, MemberCategory, MemberDescriptor, OBJECT_TYPE, TypeDescriptor, TypeRef, VALUE_TYPE,
};
use std::collections::{BTreeMap, HashSet};

/// Deepest nesting level that is expanded; top-level types are level 1.
pub const MAX_DEPTH: usize = 5;

pub const GLOBAL_NAMESPACE: &str = "Global";

const TRIVIAL_BASES: [&str; 3] = [OBJECT_TYPE, VALUE_TYPE, ENUM_TYPE];

#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
    pub max_depth: usize,
    pub discovery: Discovery,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            discovery: Discovery::All,
        }
    }
}

struct Dumper<'a> {
    snapshot: &'a Snapshot,
    options: &'a DumpOptions,
    out: String,
}

pub fn dump(snapshot: &Snapshot, options: &DumpOptions) -> String {
    let mut namespaces: BTreeMap<&str, Vec<&TypeDescriptor>> = BTreeMap::new();
    for ty in snapshot.roots() {
        let namespace = ty.namespace.as_deref().unwrap_or(GLOBAL_NAMESPACE);
        namespaces.entry(namespace).or_default().push(ty);
    }

    let mut dumper = Dumper {
        snapshot,
        options,
        out: String::from(markup::DUMP_SECTION),
    };
    if namespaces.is_empty() {
        dumper.out.push_str(markup::NONE_PRESENT);
    }
    for (namespace, types) in namespaces {
        dumper.out.push_str("[br][tab]");
        dumper
            .out
            .push_str(&format!("[blue]namespace[/] [purple]{}[/][br]", namespace));
        dumper.out.push_str("[tab]{");
        for ty in types {
            dumper.dump_type(ty, 1);
        }
        dumper.out.push_str("[tab]}[br]");
    }
    dumper.out
}

impl Dumper<'_> {
    fn dump_type(&mut self, ty: &TypeDescriptor, depth: usize) {
        let indent = "[tab]".repeat(depth + 1);
        let modifiers = type_modifiers(ty);
        self.out.push_str("[br]");

        if ty.is_delegate() {
            let signature = match ty.delegate_invoke() {
                Some(invoke) => format!(
                    "[pink]{}[/] [sky]{}[/]({});",
                    invoke.value_type().map(TypeRef::name).unwrap_or_default(),
                    ty.name,
                    markup::parameters(invoke)
                ),
                None => format!("[sky]{}[/];", ty.name),
            };
            self.out
                .push_str(&format!("{}[blue]{}[/] {}[br]", indent, modifiers, signature));
            return;
        }

        self.out.push_str(&format!(
            "{}[blue]{}[/] {}",
            indent,
            modifiers,
            markup::styled_type_name(ty)
        ));
        let bases = self.base_clause(ty);
        if !bases.is_empty() {
            self.out.push_str(" : ");
            self.out.push_str(&bases.join(", "));
        }

        let discovery = self.options.discovery;
        let members = |category| {
            ty.members_of(category)
                .filter(|m| discovery.admits(m, ty))
                .collect::<Vec<&MemberDescriptor>>()
        };
        let constructors = members(MemberCategory::Constructor);
        let fields = members(MemberCategory::Field);
        let properties = members(MemberCategory::Property);
        let methods = members(MemberCategory::Method);

        let has_content = !ty.enum_values.is_empty()
            || !constructors.is_empty()
            || !fields.is_empty()
            || !properties.is_empty()
            || !methods.is_empty()
            || !ty.nested.is_empty();
        if !has_content {
            self.out.push_str(" {}[br]");
            return;
        }

        let mut body = format!("[br]{}{{", indent);
        if ty.is_enum() && !ty.enum_values.is_empty() {
            let values: Vec<String> = ty
                .enum_values
                .iter()
                .map(|v| format!("[br]{}[tab][pink]{}[/]", indent, v))
                .collect();
            body.push_str(&values.join(", "));
            body.push_str("[br]");
        }
        for ctor in &constructors {
            body.push_str(&format!(
                "[br]{}[tab][blue]{}[/] [purple]{}[/]({});[br]",
                indent,
                crate::inspect::member_modifiers(ctor),
                ty.name,
                markup::parameters(ctor)
            ));
        }
        if !fields.is_empty() {
            body.push_str("[br]");
        }
        for field in &fields {
            body.push_str(&format!("{}[tab]{}", indent, markup::field(field)));
        }
        if !properties.is_empty() {
            body.push_str("[br]");
        }
        for property in &properties {
            body.push_str(&format!("{}[tab]{}", indent, markup::property(property)));
        }
        if !methods.is_empty() {
            body.push_str("[br]");
        }
        for method in &methods {
            body.push_str(&format!(
                "{}[tab]{}{}",
                indent,
                markup::inherited_prefix(method, ty),
                markup::short_method(method)
            ));
        }
        self.out.push_str(&body);

        let mut nested: Vec<&TypeDescriptor> = ty.nested.iter().collect();
        nested.sort_by(|a, b| a.name.cmp(&b.name));
        for child in nested {
            if depth < self.options.max_depth {
                self.dump_type(child, depth + 1);
            } else {
                self.out.push_str(&format!(
                    "[br]{}[tab][blue]{}[/] {} {{ ... }}[br]",
                    indent,
                    type_modifiers(child),
                    markup::styled_type_name(child)
                ));
            }
        }
        self.out.push_str(&format!("{}}}[br]", indent));
    }

    /// Non-trivial base type plus only the most-derived interfaces.
    fn base_clause(&self, ty: &TypeDescriptor) -> Vec<String> {
        let mut bases = Vec::new();
        if let Some(base) = &ty.base {
            if !TRIVIAL_BASES.contains(&base.full_name.as_str()) {
                bases.push(format!("[pink]{}[/]", base.name()));
            }
        }

        let implied: HashSet<String> = ty
            .interfaces
            .iter()
            .flat_map(|i| self.interfaces_of(i))
            .collect();
        bases.extend(
            ty.interfaces
                .iter()
                .filter(|i| !implied.contains(&i.full_name))
                .map(|i| format!("[aqua]{}[/]", i.name())),
        );
        bases
    }

    /// An interface's own interfaces, from the snapshot when it is defined there.
    fn interfaces_of(&self, interface: &TypeRef) -> Vec<String> {
        match self.snapshot.find(&interface.full_name) {
            Some(ty) => ty.interfaces.iter().map(|r| r.full_name.clone()).collect(),
            None => interface.interfaces.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;
    use crate::provider::{MetadataProvider, NativeComponentBuilder, TypeBuilder, sample};

    fn example() -> Snapshot {
        Snapshot::build("ExampleLibrary", sample::component().types().unwrap()).unwrap()
    }

    #[test]
    fn test_dump_is_deterministic() {
        let snapshot = example();
        let options = DumpOptions::default();
        assert_eq!(dump(&snapshot, &options), dump(&snapshot, &options));
    }

    #[test]
    fn test_example_dump_shape() {
        let out = dump(&example(), &DumpOptions::default());
        assert!(out.starts_with(markup::DUMP_SECTION));
        assert!(out.contains("[br][tab][blue]namespace[/] [purple]ExampleLibrary[/][br][tab]{"));
        assert!(out.contains(
            "[tab][tab][blue]public class[/] [purple]Device[/] : [aqua]IDevice[/][br]"
        ));
        assert!(out.contains(
            "[tab][tab][blue]internal enum[/] [pink]DeviceStatus[/][br][tab][tab]{[br]\
             [tab][tab][tab][pink]Off[/], "
        ));
        assert!(out.contains(
            "[tab][tab][blue]public sealed delegate[/] [pink]Void[/] [sky]StatusChanged[/]\
             ([pink]DeviceStatus[/] oldStatus, [pink]DeviceStatus[/] newStatus);[br]"
        ));
        assert!(out.contains("[br][tab][tab][tab][blue]public[/] [purple]Device[/]();[br]"));
        assert!(out.ends_with("[tab]}[br]"));
    }

    #[test]
    fn test_namespaces_sorted_with_global_bucket() {
        let types = vec![
            TypeDescriptor::new(TypeKind::Class, Some("Zeta"), "Z"),
            TypeDescriptor::new(TypeKind::Class, None, "Loose"),
            TypeDescriptor::new(TypeKind::Class, Some("Alpha"), "A"),
        ];
        let out = dump(&Snapshot::build("App", types).unwrap(), &DumpOptions::default());
        let alpha = out.find("[purple]Alpha[/]").unwrap();
        let global = out.find("[purple]Global[/]").unwrap();
        let zeta = out.find("[purple]Zeta[/]").unwrap();
        assert!(alpha < global && global < zeta);
        assert!(out.contains("[blue]public class[/] [purple]Loose[/] {}[br]"));
    }

    #[test]
    fn test_nesting_beyond_max_depth_is_a_placeholder() {
        let mut level = TypeBuilder::new(TypeKind::Class, None, "L7");
        for name in ["L6", "L5", "L4", "L3", "L2"] {
            level = TypeBuilder::new(TypeKind::Class, None, name).nested(level);
        }
        let component = NativeComponentBuilder::new("Deep")
            .ty(TypeBuilder::class("Deep", "L1").nested(level))
            .build();
        let snapshot = Snapshot::build("Deep", component.types().unwrap()).unwrap();
        let out = dump(&snapshot, &DumpOptions::default());

        assert!(out.contains("[blue]public class[/] [purple]L5[/][br]"));
        assert!(out.contains("[blue]public class[/] [purple]L6[/] { ... }[br]"));
        assert!(!out.contains("L7"));
    }

    #[test]
    fn test_only_most_derived_interfaces_are_listed() {
        let ia = TypeDescriptor::new(TypeKind::Interface, Some("App"), "IA");
        let mut ib = TypeDescriptor::new(TypeKind::Interface, Some("App"), "IB");
        ib.interfaces.push(TypeRef::new("App.IA"));
        let mut c = TypeDescriptor::new(TypeKind::Class, Some("App"), "C");
        c.interfaces = vec![TypeRef::new("App.IA"), TypeRef::new("App.IB")];

        let out = dump(&Snapshot::build("App", vec![ia, ib, c]).unwrap(), &DumpOptions::default());
        assert!(out.contains("[purple]C[/] : [aqua]IB[/] {}[br]"));
    }

    #[test]
    fn test_external_interfaces_use_reference_interfaces() {
        let mut list = TypeDescriptor::new(TypeKind::Class, Some("App"), "Bag");
        list.interfaces = vec![
            TypeRef::new("System.Collections.IEnumerable"),
            TypeRef::new("System.Collections.ICollection")
                .with_interfaces(["System.Collections.IEnumerable"]),
        ];
        let mut base = TypeDescriptor::new(TypeKind::Class, Some("App"), "Sub");
        base.base = Some(TypeRef::new("App.Bag"));

        let out = dump(&Snapshot::build("App", vec![list, base]).unwrap(), &DumpOptions::default());
        assert!(out.contains("[purple]Bag[/] : [aqua]ICollection[/] {}[br]"));
        assert!(out.contains("[purple]Sub[/] : [pink]Bag[/] {}[br]"));
    }

    #[test]
    fn test_declared_only_hides_inherited_methods() {
        let options = DumpOptions {
            discovery: Discovery::DeclaredOnly,
            ..Default::default()
        };
        let out = dump(&example(), &options);
        assert!(!out.contains("(inherited)"));
        assert!(out.contains("[teal]PrintStatus[/]()"));
    }
}
