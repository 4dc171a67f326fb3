mod bundled;
mod manifest;
mod native;
pub mod sample;
pub mod system;

use crate::fs::FileSystem;
use crate::model::{MemberDescriptor, TypeDescriptor, Value};
use std::any::Any;
use std::path::Path;
use thiserror::Error;

pub use bundled::BundledFormat;
pub use manifest::{ManifestComponent, ManifestFormat};
pub use native::{NativeComponent, NativeComponentBuilder, NativeConstructor, NativeFn, TypeBuilder};

/// An object created by a component runtime.
pub type Instance = Box<dyn Any>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid file type: '{0}'. Expected a .json component manifest or a bundled component")]
    UnsupportedFormat(String),
    #[error("Failed to read component: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{path}' is not a valid component manifest: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("duplicate type '{0}'")]
    DuplicateType(String),
    #[error("member '{member}' is declared by '{declaring}', which is not in the component")]
    UnknownDeclaringType { member: String, declaring: String },
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("No parameterless constructor defined for type '{0}'")]
    MissingConstructor(String),
    #[error("No executable body is available for '{0}'")]
    MissingBody(String),
    #[error("'{method}' expects {expected} argument(s) but {given} were supplied")]
    ParameterCount {
        method: String,
        expected: usize,
        given: usize,
    },
    #[error("instance is not a '{0}'")]
    WrongInstance(String),
    #[error("{0}")]
    Raised(String),
}

/// Supplies the descriptor graph of a loaded component.
pub trait MetadataProvider {
    fn types(&self) -> Result<Vec<TypeDescriptor>, ProviderError>;
}

/// Everything a method body gets to see during one call.
pub struct CallFrame<'a> {
    /// Full name of the type the method was resolved on.
    pub type_name: &'a str,
    pub this: Option<&'a mut (dyn Any + 'static)>,
    pub args: &'a [Value],
    /// Text the call writes to the console.
    pub console: &'a mut String,
}

impl CallFrame<'_> {
    pub fn this_mut<T: 'static>(&mut self) -> Result<&mut T, RuntimeError> {
        self.this
            .as_deref_mut()
            .and_then(|any| any.downcast_mut::<T>())
            .ok_or_else(|| RuntimeError::WrongInstance(std::any::type_name::<T>().to_string()))
    }

    pub fn arg(&self, index: usize) -> Result<&Value, RuntimeError> {
        self.args
            .get(index)
            .ok_or_else(|| RuntimeError::Raised(format!("missing argument {}", index)))
    }

    pub fn arg_i64(&self, index: usize) -> Result<i64, RuntimeError> {
        let value = self.arg(index)?;
        value.as_i64().ok_or_else(|| {
            RuntimeError::Raised(format!("argument {} is not an integer: {}", index, value))
        })
    }

    pub fn arg_f64(&self, index: usize) -> Result<f64, RuntimeError> {
        let value = self.arg(index)?;
        value.as_f64().ok_or_else(|| {
            RuntimeError::Raised(format!("argument {} is not a number: {}", index, value))
        })
    }

    pub fn write_line(&mut self, text: &str) {
        self.console.push_str(text);
        self.console.push('\n');
    }
}

/// Executes constructors and method bodies of a loaded component.
pub trait ComponentRuntime {
    /// Create an instance through the type's parameterless construction path.
    fn construct(&self, ty: &TypeDescriptor) -> Result<Instance, RuntimeError>;

    fn call(
        &self,
        ty: &TypeDescriptor,
        method: &MemberDescriptor,
        frame: &mut CallFrame<'_>,
    ) -> Result<Value, RuntimeError>;
}

/// A loaded component: its metadata plus the runtime behind it.
pub trait Component: MetadataProvider + ComponentRuntime {
    fn name(&self) -> &str;

    /// Name and version as shown after loading.
    fn display_name(&self) -> String {
        self.name().to_string()
    }
}

/// A way of turning a path into a loaded component.
pub trait ComponentFormat {
    fn accepts(&self, path: &Path) -> bool;
    fn load(&self, path: &Path, fs: &dyn FileSystem) -> Result<Box<dyn Component>, LoadError>;
}

pub struct ComponentLoader {
    formats: Vec<Box<dyn ComponentFormat>>,
}

impl ComponentLoader {
    pub fn new() -> Self {
        Self {
            formats: vec![Box::new(BundledFormat), Box::new(ManifestFormat)],
        }
    }

    pub fn load(&self, path: &Path, fs: &dyn FileSystem) -> Result<Box<dyn Component>, LoadError> {
        match self.formats.iter().find(|f| f.accepts(path)) {
            Some(format) => format.load(path, fs),
            None => {
                let ext = path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default();
                Err(LoadError::UnsupportedFormat(ext))
            }
        }
    }
}

impl Default for ComponentLoader {
    fn default() -> Self {
        Self::new()
    }
}
