use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use super::{normalize, ResourceProvider};

/// Resources stored as plain files below a root directory.
///
/// Paths that would escape the root (`../secret.yml`) are treated as missing.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File-system location of `path`, or `None` if it is not a plain
    /// relative path.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(normalize(path));
        if relative.as_os_str().is_empty() {
            return None;
        }
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        plain.then(|| self.root.join(relative))
    }
}

impl ResourceProvider for DirectoryResources {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        let full = self.resolve(path)?;
        match File::open(&full) {
            Ok(file) => Some(Box::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("cannot open bundled resource {}: {e}", full.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_relative_path() {
        let resources = DirectoryResources::new("/bundle");
        assert_eq!(
            resources.resolve("/lang/en.yml"),
            Some(PathBuf::from("/bundle/lang/en.yml"))
        );
    }

    #[test]
    fn test_resolve_rejects_parent_components() {
        let resources = DirectoryResources::new("/bundle");
        assert_eq!(resources.resolve("../etc/passwd"), None);
        assert_eq!(resources.resolve("lang/../../x.yml"), None);
    }

    #[test]
    fn test_open_missing_file_is_none() {
        let resources = DirectoryResources::new("/nonexistent/bundle/root");
        assert!(resources.open("config.yml").is_none());
    }

    #[test]
    fn test_open_existing_file() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("cfgstore_res_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("lang")).unwrap();
        std::fs::write(dir.join("lang/en.yml"), "greeting: Hello\n").unwrap();
        let resources = DirectoryResources::new(&dir);

        // Act
        let mut text = String::new();
        resources
            .open("lang/en.yml")
            .expect("resource present")
            .read_to_string(&mut text)
            .unwrap();

        // Assert
        assert_eq!(text, "greeting: Hello\n");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }
}
