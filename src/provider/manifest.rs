//! JSON component manifests: metadata-only components described on disk.

use super::{
    CallFrame, Component, ComponentFormat, ComponentRuntime, Instance, LoadError,
    MetadataProvider, ProviderError, RuntimeError, native::add_enum_fields,
};
use crate::fs::FileSystem;
use crate::model::{
    Dispatch, MemberDescriptor, Parameter, TypeDescriptor, TypeKind, TypeRef,
    VOID_TYPE, Value, Visibility,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: String,
    version: Option<String>,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    namespace: Option<String>,
    name: String,
    kind: TypeKind,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "abstract")]
    is_abstract: bool,
    #[serde(default, rename = "sealed")]
    is_sealed: bool,
    /// Defaults to the root type implied by `kind`.
    base: Option<RawTypeRef>,
    #[serde(default)]
    interfaces: Vec<RawTypeRef>,
    #[serde(default)]
    fields: Vec<RawField>,
    #[serde(default)]
    properties: Vec<RawProperty>,
    #[serde(default)]
    constructors: Vec<RawConstructor>,
    #[serde(default)]
    methods: Vec<RawMethod>,
    #[serde(default)]
    nested: Vec<RawType>,
    #[serde(default)]
    enum_values: Vec<String>,
}

/// `"System.Int32"`, `"System.Int32?"` or `{ "name": ..., "interfaces": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTypeRef {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        interfaces: Vec<String>,
    },
}

impl RawTypeRef {
    fn resolve(&self) -> TypeRef {
        match self {
            RawTypeRef::Name(name) => TypeRef::parse(name),
            RawTypeRef::Full { name, interfaces } => {
                TypeRef::parse(name).with_interfaces(interfaces.iter().cloned())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMember {
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "static")]
    is_static: bool,
    inherited_from: Option<String>,
}

impl RawMember {
    fn apply(&self, mut member: MemberDescriptor) -> MemberDescriptor {
        member = member.with_visibility(self.visibility);
        if self.is_static {
            member = member.as_static();
        }
        match &self.inherited_from {
            Some(declaring) => member.inherited_from(declaring),
            None => member,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(flatten)]
    common: RawMember,
    #[serde(default)]
    readonly: bool,
    #[serde(default, rename = "const")]
    constant: bool,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(flatten)]
    common: RawMember,
    #[serde(default = "default_true")]
    get: bool,
    #[serde(default)]
    set: bool,
    #[serde(default)]
    dispatch: Dispatch,
}

#[derive(Debug, Deserialize)]
struct RawConstructor {
    #[serde(flatten)]
    common: RawMember,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    name: String,
    #[serde(flatten)]
    common: RawMember,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    returns: Option<RawTypeRef>,
    #[serde(default)]
    dispatch: Dispatch,
}

fn default_true() -> bool {
    true
}

fn parameters(raw: &[RawParameter]) -> Vec<Parameter> {
    raw.iter()
        .map(|p| Parameter {
            name: p.name.clone(),
            parameter_type: p.ty.resolve(),
        })
        .collect()
}

fn convert(
    raw: &RawType,
    parent: Option<&TypeDescriptor>,
) -> Result<TypeDescriptor, ProviderError> {
    if !raw.enum_values.is_empty() && raw.kind != TypeKind::Enum {
        return Err(ProviderError::Other(format!(
            "type '{}' declares enum values but is not an enum",
            raw.name
        )));
    }

    let mut desc = TypeDescriptor::new(raw.kind, raw.namespace.as_deref(), &raw.name);
    desc.visibility = raw.visibility;
    desc.is_abstract = raw.is_abstract;
    desc.is_sealed = raw.is_sealed;
    if let Some(base) = &raw.base {
        desc.base = Some(base.resolve());
    }
    desc.interfaces = raw.interfaces.iter().map(RawTypeRef::resolve).collect();
    desc.enum_values = raw.enum_values.clone();

    let fields = raw.fields.iter().map(|f| {
        let mut member = f.common.apply(MemberDescriptor::field(&f.name, f.ty.resolve()));
        if f.readonly {
            member = member.readonly();
        }
        if f.constant {
            member = member.constant();
        }
        member
    });
    let properties = raw.properties.iter().map(|p| {
        let property = MemberDescriptor::property(&p.name, p.ty.resolve(), p.get, p.set);
        p.common.apply(property.with_dispatch(p.dispatch))
    });
    let constructors = raw
        .constructors
        .iter()
        .map(|c| c.common.apply(MemberDescriptor::constructor(parameters(&c.parameters))));
    let methods = raw.methods.iter().map(|m| {
        let returns = m
            .returns
            .as_ref()
            .map(RawTypeRef::resolve)
            .unwrap_or_else(|| TypeRef::new(VOID_TYPE));
        m.common.apply(
            MemberDescriptor::method(&m.name, parameters(&m.parameters), returns)
                .with_dispatch(m.dispatch),
        )
    });
    desc.members = fields
        .chain(properties)
        .chain(constructors)
        .chain(methods)
        .collect();
    desc.claim_members("");

    if let Some(parent) = parent {
        desc.nest_under(parent);
    }
    if desc.kind == TypeKind::Enum {
        add_enum_fields(&mut desc);
    }
    for nested in &raw.nested {
        let child = convert(nested, Some(&desc))?;
        desc.nested.push(child);
    }
    Ok(desc)
}

/// A component read from a JSON manifest. It carries no executable code.
pub struct ManifestComponent {
    manifest: RawManifest,
}

impl ManifestComponent {
    pub fn from_json(path: &str, json: &str) -> Result<Self, LoadError> {
        let manifest = serde_json::from_str(json).map_err(|source| LoadError::Malformed {
            path: path.to_string(),
            source,
        })?;
        Ok(Self { manifest })
    }
}

impl MetadataProvider for ManifestComponent {
    fn types(&self) -> Result<Vec<TypeDescriptor>, ProviderError> {
        self.manifest
            .types
            .iter()
            .map(|t| convert(t, None))
            .collect()
    }
}

impl ComponentRuntime for ManifestComponent {
    fn construct(&self, ty: &TypeDescriptor) -> Result<Instance, RuntimeError> {
        Err(RuntimeError::MissingBody(format!("{}..ctor()", ty.full_name)))
    }

    fn call(
        &self,
        ty: &TypeDescriptor,
        method: &MemberDescriptor,
        _frame: &mut CallFrame<'_>,
    ) -> Result<Value, RuntimeError> {
        Err(RuntimeError::MissingBody(format!(
            "{}.{}",
            ty.full_name,
            method.signature()
        )))
    }
}

impl Component for ManifestComponent {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn display_name(&self) -> String {
        match &self.manifest.version {
            Some(version) => format!("{}, Version={}", self.manifest.name, version),
            None => self.manifest.name.clone(),
        }
    }
}

/// Loads `.json` component manifests.
pub struct ManifestFormat;

impl ComponentFormat for ManifestFormat {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    }

    fn load(&self, path: &Path, fs: &dyn FileSystem) -> Result<Box<dyn Component>, LoadError> {
        let display = path.display().to_string();
        if !fs.exists(path) {
            return Err(LoadError::FileNotFound(display));
        }
        let json = fs.read_to_string(path)?;
        Ok(Box::new(ManifestComponent::from_json(&display, &json)?))
    }
}
