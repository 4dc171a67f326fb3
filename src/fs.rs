//! Centralized filesystem operations for better testability.
//!
//! Component manifests are read through the `FileSystem` trait so loaders can
//! be exercised against an in-memory filesystem in tests.

use std::io;
use std::path::Path;

/// Trait for filesystem operations, enabling dependency injection and testing.
pub trait FileSystem {
    /// Read the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation using std::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Global default filesystem for use when dependency injection isn't practical.
pub fn default_fs() -> &'static RealFs {
    static INSTANCE: RealFs = RealFs;
    &INSTANCE
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// In-memory filesystem for testing.
    #[derive(Debug, Default)]
    pub struct MockFs {
        files: HashMap<String, String>,
    }

    impl MockFs {
        /// Pre-populate the mock filesystem with files.
        pub fn with_files<I, P, C>(files: I) -> Self
        where
            I: IntoIterator<Item = (P, C)>,
            P: AsRef<Path>,
            C: Into<String>,
        {
            let files = files
                .into_iter()
                .map(|(p, c)| (p.as_ref().to_string_lossy().to_string(), c.into()))
                .collect();
            Self { files }
        }
    }

    impl FileSystem for MockFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            let key = path.to_string_lossy().to_string();
            self.files.get(&key).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("file not found: {}", key))
            })
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path.to_string_lossy().as_ref())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mock_fs_with_files() {
            let fs = MockFs::with_files([
                (Path::new("/a.json"), "content a"),
                (Path::new("/b.json"), "content b"),
            ]);

            assert!(fs.exists(Path::new("/a.json")));
            assert!(!fs.exists(Path::new("/c.json")));
            assert_eq!(fs.read_to_string(Path::new("/b.json")).unwrap(), "content b");
            assert!(fs.read_to_string(Path::new("/c.json")).is_err());
        }
    }
}
