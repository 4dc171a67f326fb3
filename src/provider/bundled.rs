use super::{Component, ComponentFormat, LoadError, sample};
use crate::fs::FileSystem;
use std::path::Path;

/// File names that resolve to components shipped inside the binary.
pub const BUNDLED_COMPONENTS: &[&str] = &["example.dll"];

/// Loads bundled components by file name, without touching the filesystem.
pub struct BundledFormat;

impl ComponentFormat for BundledFormat {
    fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| BUNDLED_COMPONENTS.iter().any(|b| b.eq_ignore_ascii_case(n)))
    }

    fn load(&self, _path: &Path, _fs: &dyn FileSystem) -> Result<Box<dyn Component>, LoadError> {
        Ok(Box::new(sample::component()))
    }
}
