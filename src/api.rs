//! Library API for the component inspector.
//!
//! Unlike [`crate::cmd_inspect`], which prints markup and returns an exit
//! code, these functions hand back a [`Session`] and proper `Result` types.
//!
//! # Example
//!
//! ```no_run
//! use component_inspector::{InvocationRequest, ListingOptions, open, render_plain, OpenOptions};
//! use std::path::Path;
//!
//! let mut session = open(Path::new("example.dll"), OpenOptions::default())?;
//! println!("{}", render_plain(&session.list_types(&ListingOptions::default())?));
//!
//! let result = session.invoke(&InvocationRequest::new("ExampleLibrary.Device.SetStatus", ["1"]))?;
//! println!("{:?}", result.result);
//! # Ok::<(), component_inspector::InspectorError>(())
//! ```

use crate::config::ConfigError;
use crate::fs::{FileSystem, default_fs};
use crate::inspect::{InspectError, Session};
use crate::provider::{ComponentLoader, LoadError};
use crate::style::Renderer;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while opening or inspecting a component.
#[derive(Debug, Error)]
pub enum InspectorError {
    /// The component could not be located or read.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Inspection or invocation failed.
    #[error(transparent)]
    Inspect(#[from] InspectError),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Options for the `open` function.
pub struct OpenOptions<'a> {
    /// Filesystem used to read component manifests.
    pub fs: &'a dyn FileSystem,
}

impl Default for OpenOptions<'_> {
    fn default() -> Self {
        Self { fs: default_fs() }
    }
}

/// Load the component at `path` and inspect it into a fresh session.
///
/// `example.dll` resolves to the bundled sample component; `.json` paths are
/// read as component manifests.
pub fn open(path: &Path, options: OpenOptions<'_>) -> Result<Session, InspectorError> {
    let component = ComponentLoader::new().load(path, options.fs)?;
    let mut session = Session::new();
    session.inspect(component)?;
    Ok(session)
}

/// Render markup produced by the session as plain text, without colors.
pub fn render_plain(markup: &str) -> String {
    Renderer::default().render(markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use crate::output::ListingOptions;

    #[test]
    fn test_open_bundled_component() {
        let session = open(Path::new("example.dll"), OpenOptions::default()).unwrap();
        assert!(session.component_name().unwrap().starts_with("ExampleLibrary"));
        assert!(session.snapshot().unwrap().find("ExampleLibrary.Device").is_some());
    }

    #[test]
    fn test_open_manifest_from_mock_fs() {
        let manifest = r#"{
            "name": "Tiny",
            "types": [ { "namespace": "T", "name": "Only", "kind": "class" } ]
        }"#;
        let fs = MockFs::with_files([("tiny.json", manifest)]);
        let session = open(Path::new("tiny.json"), OpenOptions { fs: &fs }).unwrap();
        let listing = render_plain(&session.list_types(&ListingOptions::default()).unwrap());
        assert!(listing.contains("Only"));
    }

    #[test]
    fn test_open_missing_manifest() {
        let fs = MockFs::default();
        let err = open(Path::new("gone.json"), OpenOptions { fs: &fs }).err().unwrap();
        assert!(matches!(err, InspectorError::Load(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_render_plain_strips_tags() {
        assert_eq!(render_plain("[red]hi[/][br]"), "hi\n");
    }
}
