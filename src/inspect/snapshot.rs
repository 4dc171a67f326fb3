use crate::model::{DeclaringType, TypeDescriptor};
use crate::provider::ProviderError;
use std::collections::HashSet;

/// Immutable view of every type descriptor of one inspected component.
#[derive(Debug, Clone)]
pub struct Snapshot {
    component: String,
    roots: Vec<TypeDescriptor>,
}

impl Snapshot {
    /// Validate provider output: qualified names must be unique and every
    /// non-external declaring type must be part of the snapshot.
    pub fn build(component: &str, roots: Vec<TypeDescriptor>) -> Result<Self, ProviderError> {
        let snapshot = Self {
            component: component.to_string(),
            roots,
        };

        let mut names = HashSet::new();
        for ty in snapshot.types() {
            if !names.insert(ty.full_name.as_str()) {
                return Err(ProviderError::DuplicateType(ty.full_name.clone()));
            }
        }
        for ty in snapshot.types() {
            for member in &ty.members {
                if let DeclaringType::Snapshot(declaring) = &member.declaring_type {
                    if !names.contains(declaring.as_str()) {
                        return Err(ProviderError::UnknownDeclaringType {
                            member: format!("{}.{}", ty.full_name, member.name),
                            declaring: declaring.clone(),
                        });
                    }
                }
            }
        }
        Ok(snapshot)
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Types that are not nested inside another type.
    pub fn roots(&self) -> &[TypeDescriptor] {
        &self.roots
    }

    /// All types, nested ones included, in depth-first provider order.
    pub fn types(&self) -> Vec<&TypeDescriptor> {
        fn walk<'a>(types: &'a [TypeDescriptor], out: &mut Vec<&'a TypeDescriptor>) {
            for ty in types {
                out.push(ty);
                walk(&ty.nested, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.types().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find(&self, full_name: &str) -> Option<&TypeDescriptor> {
        self.types().into_iter().find(|t| t.full_name == full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberDescriptor, TypeKind, TypeRef};

    fn class(name: &str) -> TypeDescriptor {
        TypeDescriptor::new(TypeKind::Class, Some("App"), name)
    }

    #[test]
    fn test_types_are_flattened_depth_first() {
        let mut outer = class("Outer");
        let mut inner = class("Inner");
        inner.nest_under(&outer);
        outer.nested.push(inner);
        let snapshot = Snapshot::build("App", vec![outer, class("Other")]).unwrap();

        let names: Vec<_> = snapshot.types().iter().map(|t| t.full_name.as_str()).collect();
        assert_eq!(names, vec!["App.Outer", "App.Outer+Inner", "App.Other"]);
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.find("App.Outer+Inner").is_some());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = Snapshot::build("App", vec![class("A"), class("A")]).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateType(name) if name == "App.A"));
    }

    #[test]
    fn test_unknown_declaring_type_is_rejected() {
        let mut ty = class("A");
        let mut field = MemberDescriptor::field("x", TypeRef::new("System.Int32"));
        field.declaring_type = DeclaringType::Snapshot("App.Missing".to_string());
        ty.members.push(field);
        assert!(Snapshot::build("App", vec![ty]).is_err());
    }
}
