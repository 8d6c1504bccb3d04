//! On-disk YAML config files.
//!
//! A store's file lives at `<data-dir>/<sub-directory>/<name>.yml`.  On first
//! run the file does not exist yet, so [`seed_from_resource`] copies the
//! bundled default of the same relative path into place:
//!
//! ```text
//! bundle                         data dir
//! ├── config.yml        ──►      ├── config.yml
//! └── lang/en.yml       ──►      └── lang/en.yml
//! ```
//!
//! # Failure behaviour
//!
//! - A missing bundled resource is [`StorageError::MissingResource`].
//! - An I/O failure while copying is [`StorageError::Io`]; the partially
//!   written file is removed so the next start retries the seed.
//! - A malformed on-disk document (bad YAML, or bytes that are not UTF-8) is
//!   logged and loaded as an empty document, so a bad user edit degrades to
//!   defaults instead of preventing the plugin from starting.

use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

use cfgstore_core::{parse_document, to_yaml_string, ConfigSection};
use tracing::{debug, info, warn};

use super::{io_at, StorageError};
use crate::infrastructure::resources::ResourceProvider;

/// Creates `dir` and any missing parents.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(io_at(dir))
}

/// Copies the bundled resource at `resource_path` to `target`, creating
/// parent directories.  Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`StorageError::MissingResource`] if the provider has no such
/// resource and [`StorageError::Io`] if the copy fails (including when
/// `target` already exists).
pub fn seed_from_resource(
    resources: &dyn ResourceProvider,
    resource_path: &str,
    target: &Path,
) -> Result<u64, StorageError> {
    let mut reader = resources
        .open(resource_path)
        .ok_or_else(|| StorageError::MissingResource {
            path: resource_path.to_string(),
        })?;

    if let Some(dir) = target.parent() {
        ensure_dir(dir)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(io_at(target))?;

    match io::copy(&mut reader, &mut file) {
        Ok(bytes) => {
            info!("seeded {} from bundled {resource_path} ({bytes} bytes)", target.display());
            Ok(bytes)
        }
        Err(source) => {
            drop(file);
            if let Err(e) = fs::remove_file(target) {
                warn!("could not remove partial file {}: {e}", target.display());
            }
            Err(StorageError::Io {
                path: target.to_path_buf(),
                source,
            })
        }
    }
}

/// Reads and parses the config file at `path`.
///
/// A malformed document, including one that is not valid UTF-8, is logged at
/// `warn` and returned as an empty section.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the file cannot be read.
pub fn load_document(path: &Path) -> Result<ConfigSection, StorageError> {
    let bytes = fs::read(path).map_err(io_at(path))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("config {} is not valid UTF-8: {e}; continuing with an empty document", path.display());
            return Ok(ConfigSection::new());
        }
    };
    match parse_document(&text) {
        Ok(section) => {
            debug!("loaded {} ({} top-level keys)", path.display(), section.len());
            Ok(section)
        }
        Err(e) => {
            warn!("malformed config {}: {e}; continuing with an empty document", path.display());
            Ok(ConfigSection::new())
        }
    }
}

/// Parses the bundled resource at `resource_path`.
///
/// Unlike [`load_document`], a malformed bundled document is an error: it is
/// a packaging bug, not a user edit.
///
/// # Errors
///
/// Returns [`StorageError::MissingResource`], [`StorageError::Io`] if the
/// stream fails, or [`StorageError::Document`] if the YAML is malformed.
pub fn read_bundled(
    resources: &dyn ResourceProvider,
    resource_path: &str,
) -> Result<ConfigSection, StorageError> {
    let mut reader = resources
        .open(resource_path)
        .ok_or_else(|| StorageError::MissingResource {
            path: resource_path.to_string(),
        })?;
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(io_at(resource_path))?;
    Ok(parse_document(&text)?)
}

/// Renders `section` as YAML and writes it to `path`, creating parent
/// directories.
///
/// # Errors
///
/// Returns [`StorageError::Io`] for file-system failures or
/// [`StorageError::Document`] if rendering fails.
pub fn save_document(path: &Path, section: &ConfigSection) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }
    let content = to_yaml_string(section)?;
    fs::write(path, content).map_err(io_at(path))?;
    debug!("saved {}", path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use mockall::predicate::eq;

    use super::*;
    use crate::infrastructure::resources::{EmbeddedResources, MockResourceProvider};

    static BUNDLE: EmbeddedResources = EmbeddedResources::new(&[
        ("config.yml", b"volume: 0.5\ntags: [a, b]\n"),
        ("lang/en.yml", b"greeting: '&aHello'\n"),
        ("broken.yml", b"a: [unclosed\n"),
    ]);

    /// Yields a few bytes, then fails.
    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::Other, "bundle truncated"));
            }
            self.sent = true;
            let chunk = b"volume:";
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cfgstore_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    // ── seed_from_resource ────────────────────────────────────────────────────

    #[test]
    fn test_seed_copies_bundled_bytes_and_creates_parents() {
        // Arrange
        let dir = temp_dir();
        let target = dir.join("lang").join("en.yml");

        // Act
        let bytes = seed_from_resource(&BUNDLE, "lang/en.yml", &target).expect("seed");

        // Assert
        assert_eq!(fs::read(&target).unwrap(), b"greeting: '&aHello'\n");
        assert_eq!(bytes, 20);

        // Cleanup
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_seed_missing_resource_is_error_and_writes_nothing() {
        let dir = temp_dir();
        let target = dir.join("missing.yml");

        let result = seed_from_resource(&BUNDLE, "missing.yml", &target);

        assert!(matches!(result, Err(StorageError::MissingResource { ref path }) if path == "missing.yml"));
        assert!(!target.exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_seed_failure_removes_partial_file() {
        // Arrange: a provider whose stream breaks after the first chunk
        let dir = temp_dir();
        let target = dir.join("config.yml");
        let mut provider = MockResourceProvider::new();
        provider
            .expect_open()
            .with(eq("config.yml"))
            .times(1)
            .returning(|_| Some(Box::new(FailingReader { sent: false })));

        // Act
        let result = seed_from_resource(&provider, "config.yml", &target);

        // Assert
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(!target.exists(), "partial file must be removed");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_seed_refuses_to_overwrite_existing_file() {
        let dir = temp_dir();
        let target = dir.join("config.yml");
        fs::write(&target, "volume: 1.0\n").unwrap();

        let result = seed_from_resource(&BUNDLE, "config.yml", &target);

        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert_eq!(fs::read_to_string(&target).unwrap(), "volume: 1.0\n");
        fs::remove_dir_all(&dir).ok();
    }

    // ── load / save ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_malformed_document_yields_empty_section() {
        let dir = temp_dir();
        let path = dir.join("config.yml");
        fs::write(&path, "a: [unclosed\n").unwrap();

        let doc = load_document(&path).expect("malformed is not an error");

        assert!(doc.is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_non_utf8_document_yields_empty_section() {
        // Arrange: a hand edit saved as Latin-1
        let dir = temp_dir();
        let path = dir.join("config.yml");
        fs::write(&path, b"prefix: caf\xe9\n").unwrap();

        // Act
        let doc = load_document(&path).expect("undecodable file is not an error");

        // Assert
        assert!(doc.is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_document(Path::new("/nonexistent/cfgstore/config.yml"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.yml");
        let mut doc = ConfigSection::new();
        doc.set("database.pool.size", 8i64);
        doc.set("greeting", "&aHello");

        // Act
        save_document(&path, &doc).expect("save");
        let loaded = load_document(&path).expect("load");

        // Assert
        assert_eq!(loaded, doc);
        fs::remove_dir_all(&dir).ok();
    }

    // ── read_bundled ──────────────────────────────────────────────────────────

    #[test]
    fn test_read_bundled_parses_resource() {
        let doc = read_bundled(&BUNDLE, "/config.yml").expect("bundled");
        assert_eq!(doc.get_string_list("tags"), vec!["a", "b"]);
    }

    #[test]
    fn test_read_bundled_malformed_is_document_error() {
        let result = read_bundled(&BUNDLE, "broken.yml");
        assert!(matches!(result, Err(StorageError::Document(_))));
    }

    #[test]
    fn test_read_bundled_uses_provider_stream() {
        let mut provider = MockResourceProvider::new();
        provider
            .expect_open()
            .returning(|_| Some(Box::new(Cursor::new(b"x: 1\n".to_vec()))));

        let doc = read_bundled(&provider, "any.yml").expect("bundled");

        assert_eq!(doc.get_int("x", 0), 1);
    }
}
