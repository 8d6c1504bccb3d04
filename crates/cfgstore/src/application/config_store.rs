//! ConfigStore: cached, typed access to one plugin config file.
//!
//! A store owns exactly one YAML file, `<data-dir>/<sub-directory>/<name>.yml`.
//! Opening it:
//!
//! 1. creates `<data-dir>/<sub-directory>` if needed;
//! 2. seeds `<name>.yml` from the bundled resource at
//!    `<sub-directory>/<name>.yml` if the file does not exist yet;
//! 3. parses the file into the in-memory document.
//!
//! # Reading values (for beginners)
//!
//! Every typed getter comes in two flavours:
//!
//! | Getter                  | Key missing          |
//! |-------------------------|----------------------|
//! | `get_int("a.b")`        | `0`                  |
//! | `get_int_or_none("a.b")`| `None`               |
//!
//! The same pattern applies to `bool` (`false`), `double` (`0.0`), `string`
//! (`""`) and the list getters (empty list).  `get_int_or(path, def)` lets
//! the caller pick the fallback.
//!
//! String values (and the elements of string lists) pass through the store's
//! [`TextFormatter`], which by default translates `&` colour codes.
//!
//! # Caching
//!
//! The first read of a `(path, getter)` pair computes and caches the value;
//! later reads return the cached value even if the document was edited
//! through [`ConfigStore::document_mut`] in the meantime.  The cache is
//! dropped by [`ConfigStore::clear_cache`] and by the store's own mutating
//! operations ([`set`](ConfigStore::set), [`remove`](ConfigStore::remove),
//! [`reload`](ConfigStore::reload),
//! [`merge_missing_defaults`](ConfigStore::merge_missing_defaults)).

use std::fmt;
use std::path::{Path, PathBuf};

use cfgstore_core::{ConfigSection, ConfigValue, DocumentError, LegacyColorFormatter, TextFormatter};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use super::cache::{Accessor, ValueCache};
use crate::infrastructure::host::PluginHost;
use crate::infrastructure::resources::ResourceProvider;
use crate::infrastructure::storage::config_file::{
    ensure_dir, load_document, read_bundled, save_document, seed_from_resource,
};
use crate::infrastructure::storage::StorageError;

/// File extension appended to every config name.
pub const CONFIG_EXTENSION: &str = "yml";

/// Errors produced by [`ConfigStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred while seeding, loading, or saving.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundled default resource does not exist.
    #[error("bundled resource '{path}' not found")]
    MissingResource { path: String },

    /// [`ConfigStore::section`] was called for a path with no section.
    #[error("required section '{path}' is missing")]
    MissingSection { path: String },

    /// [`ConfigStore::get_as`] found a value of the wrong shape.
    #[error("value at '{path}' cannot be converted: {source}")]
    Convert {
        path: String,
        #[source]
        source: DocumentError,
    },

    /// The document could not be parsed or rendered.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io { path, source } => StoreError::Io { path, source },
            StorageError::MissingResource { path } => StoreError::MissingResource { path },
            StorageError::Document(e) => StoreError::Document(e),
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Configures and opens a [`ConfigStore`].
///
/// ```no_run
/// use cfgstore::{ConfigStore, DataDirHost, DirectoryResources};
/// use cfgstore_core::PlainText;
///
/// # fn main() -> Result<(), cfgstore::StoreError> {
/// let host = DataDirHost::new("shop", "plugins/shop");
/// let store = ConfigStore::builder("en")
///     .sub_directory("lang")
///     .formatter(PlainText)
///     .open(&host, DirectoryResources::new("bundle"))?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigStoreBuilder {
    name: String,
    sub_directory: String,
    formatter: Box<dyn TextFormatter>,
}

impl ConfigStoreBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_directory: String::new(),
            formatter: Box::new(LegacyColorFormatter),
        }
    }

    /// Directory below the data dir (and below the bundle root) holding the
    /// file.  Leading and trailing `/` are ignored.
    pub fn sub_directory(mut self, sub_directory: impl Into<String>) -> Self {
        self.sub_directory = sub_directory.into().trim_matches('/').to_string();
        self
    }

    /// Replaces the default [`LegacyColorFormatter`].
    pub fn formatter(mut self, formatter: impl TextFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Seeds (if needed) and loads the config file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingResource`] if the file is absent and the
    /// bundle has no default for it, and [`StoreError::Io`] for file-system
    /// failures.  A malformed on-disk document is not an error: it loads as
    /// an empty document.
    pub fn open<H, R>(self, host: &H, resources: R) -> Result<ConfigStore, StoreError>
    where
        H: PluginHost + ?Sized,
        R: ResourceProvider + 'static,
    {
        let file_name = format!("{}.{CONFIG_EXTENSION}", self.name);
        let resource_path = if self.sub_directory.is_empty() {
            file_name.clone()
        } else {
            format!("{}/{file_name}", self.sub_directory)
        };

        let data_dir = host.data_dir();
        let directory = if self.sub_directory.is_empty() {
            data_dir
        } else {
            data_dir.join(&self.sub_directory)
        };
        ensure_dir(&directory)?;

        let file_path = directory.join(&file_name);
        if !file_path.exists() {
            seed_from_resource(&resources, &resource_path, &file_path)?;
        }
        let document = load_document(&file_path)?;
        debug!("opened {} for plugin {}", file_path.display(), host.name());

        Ok(ConfigStore {
            name: self.name,
            file_name,
            sub_directory: self.sub_directory,
            resource_path,
            file_path,
            resources: Box::new(resources),
            formatter: self.formatter,
            document,
            cache: ValueCache::new(),
        })
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Cached, typed access to one YAML config file.
///
/// `ConfigStore` is `Send + Sync`: reads take `&self` and the cache is
/// mutex-guarded, so an `Arc<ConfigStore>` may be read from any thread.
/// Mutation (`set`, `reload`, ...) takes `&mut self`.
pub struct ConfigStore {
    name: String,
    file_name: String,
    sub_directory: String,
    resource_path: String,
    file_path: PathBuf,
    resources: Box<dyn ResourceProvider>,
    formatter: Box<dyn TextFormatter>,
    document: ConfigSection,
    cache: ValueCache,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("file_path", &self.file_path)
            .field("resource_path", &self.resource_path)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Opens `<name>.yml` under `sub_directory` with the default formatter.
    ///
    /// Pass `""` as `sub_directory` for a file directly in the data dir.
    ///
    /// # Errors
    ///
    /// See [`ConfigStoreBuilder::open`].
    pub fn open<H, R>(
        name: &str,
        host: &H,
        sub_directory: &str,
        resources: R,
    ) -> Result<Self, StoreError>
    where
        H: PluginHost + ?Sized,
        R: ResourceProvider + 'static,
    {
        Self::builder(name)
            .sub_directory(sub_directory)
            .open(host, resources)
    }

    pub fn builder(name: impl Into<String>) -> ConfigStoreBuilder {
        ConfigStoreBuilder::new(name)
    }

    // ── Metadata ─────────────────────────────────────────────────────────────

    /// Logical config name, without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name on disk, e.g. `config.yml`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn sub_directory(&self) -> &str {
        &self.sub_directory
    }

    /// Path of the bundled default, relative to the bundle root.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    // ── Raw document access ──────────────────────────────────────────────────

    pub fn document(&self) -> &ConfigSection {
        &self.document
    }

    /// Mutable access to the parsed document.
    ///
    /// Edits made here are **not** seen by getters whose values are already
    /// cached; call [`ConfigStore::clear_cache`] afterwards.
    pub fn document_mut(&mut self) -> &mut ConfigSection {
        &mut self.document
    }

    /// Returns `true` if the document defines a value at `path`.
    pub fn has(&self, path: &str) -> bool {
        self.document.contains(path)
    }

    /// Direct keys, or every nested path with `deep`.
    pub fn keys(&self, deep: bool) -> Vec<String> {
        self.document.keys(deep)
    }

    // ── Sections ─────────────────────────────────────────────────────────────

    /// Returns the section at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingSection`] if no section exists there.
    /// Check [`ConfigStore::has`] first when the section is optional, or use
    /// [`ConfigStore::section_or_none`].
    pub fn section(&self, path: &str) -> Result<ConfigSection, StoreError> {
        self.section_or_none(path)
            .ok_or_else(|| StoreError::MissingSection {
                path: path.to_string(),
            })
    }

    /// Returns the section at `path`, or `None`.  The result (including a
    /// miss) is cached.
    pub fn section_or_none(&self, path: &str) -> Option<ConfigSection> {
        self.cache.get_or_insert_with(path, Accessor::Section, || {
            self.document.section(path).cloned()
        })
    }

    // ── Scalars ──────────────────────────────────────────────────────────────

    /// Integer at `path`, or `0`.
    pub fn get_int(&self, path: &str) -> i64 {
        self.get_int_or(path, 0)
    }

    /// Integer at `path`, or `def` if absent or not numeric.
    ///
    /// Each distinct `def` is cached as its own entry for `path`, so pass a
    /// constant rather than a value that changes from call to call.
    pub fn get_int_or(&self, path: &str, def: i64) -> i64 {
        self.cache
            .get_or_insert_with(path, Accessor::Int { default: def }, || {
                self.document.get_int(path, def)
            })
    }

    pub fn get_int_or_none(&self, path: &str) -> Option<i64> {
        self.has(path).then(|| self.get_int(path))
    }

    /// Boolean at `path`, or `false`.
    pub fn get_bool(&self, path: &str) -> bool {
        self.cache.get_or_insert_with(path, Accessor::Bool, || {
            self.document.get_bool(path, false)
        })
    }

    pub fn get_bool_or_none(&self, path: &str) -> Option<bool> {
        self.has(path).then(|| self.get_bool(path))
    }

    /// Float at `path`, or `0.0`.
    pub fn get_double(&self, path: &str) -> f64 {
        self.cache.get_or_insert_with(path, Accessor::Double, || {
            self.document.get_double(path, 0.0)
        })
    }

    pub fn get_double_or_none(&self, path: &str) -> Option<f64> {
        self.has(path).then(|| self.get_double(path))
    }

    /// Formatted string at `path`, or `""`.
    pub fn get_string(&self, path: &str) -> String {
        self.cache.get_or_insert_with(path, Accessor::String, || {
            self.formatter.format(&self.document.get_string(path, ""))
        })
    }

    pub fn get_string_or_none(&self, path: &str) -> Option<String> {
        self.has(path).then(|| self.get_string(path))
    }

    // ── Lists ────────────────────────────────────────────────────────────────

    /// Integer elements of the list at `path`, or an empty list.
    pub fn get_ints(&self, path: &str) -> Vec<i64> {
        self.cache
            .get_or_insert_with(path, Accessor::Ints, || self.document.get_int_list(path))
    }

    pub fn get_ints_or_none(&self, path: &str) -> Option<Vec<i64>> {
        self.has(path).then(|| self.get_ints(path))
    }

    pub fn get_bools(&self, path: &str) -> Vec<bool> {
        self.cache
            .get_or_insert_with(path, Accessor::Bools, || self.document.get_bool_list(path))
    }

    pub fn get_bools_or_none(&self, path: &str) -> Option<Vec<bool>> {
        self.has(path).then(|| self.get_bools(path))
    }

    pub fn get_doubles(&self, path: &str) -> Vec<f64> {
        self.cache.get_or_insert_with(path, Accessor::Doubles, || {
            self.document.get_double_list(path)
        })
    }

    pub fn get_doubles_or_none(&self, path: &str) -> Option<Vec<f64>> {
        self.has(path).then(|| self.get_doubles(path))
    }

    /// Formatted string elements of the list at `path`, or an empty list.
    pub fn get_strings(&self, path: &str) -> Vec<String> {
        self.cache.get_or_insert_with(path, Accessor::Strings, || {
            self.document
                .get_string_list(path)
                .iter()
                .map(|s| self.formatter.format(s))
                .collect()
        })
    }

    pub fn get_strings_or_none(&self, path: &str) -> Option<Vec<String>> {
        self.has(path).then(|| self.get_strings(path))
    }

    // ── Typed conversion ─────────────────────────────────────────────────────

    /// Deserialises the value (or, for `""`, the whole document) at `path`
    /// into `T`.  Not cached, and strings are not formatted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Convert`] if the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, StoreError> {
        let converted = if path.is_empty() {
            self.document.deserialize_into()
        } else {
            match self.document.get(path) {
                Some(value) => value.deserialize_into(),
                None => return Ok(None),
            }
        };
        converted
            .map(Some)
            .map_err(|source| StoreError::Convert {
                path: path.to_string(),
                source,
            })
    }

    // ── Cache ────────────────────────────────────────────────────────────────

    /// Drops all cached values; the next read of every path re-derives from
    /// the current document.
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("cleared value cache for {}", self.file_name);
    }

    /// Number of cached `(path, getter)` entries.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    // ── Mutation & persistence ───────────────────────────────────────────────

    /// Sets `value` at `path` in the in-memory document and clears the cache.
    /// Call [`ConfigStore::save`] to persist.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) {
        self.document.set(path, value);
        self.cache.clear();
    }

    /// Removes the value at `path` and clears the cache.
    pub fn remove(&mut self, path: &str) -> Option<ConfigValue> {
        let removed = self.document.remove(path);
        self.cache.clear();
        removed
    }

    /// Writes the document back to the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Document`].
    pub fn save(&self) -> Result<(), StoreError> {
        Ok(save_document(&self.file_path, &self.document)?)
    }

    /// Re-reads the file from disk and clears the cache.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file can no longer be read.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.document = load_document(&self.file_path)?;
        self.cache.clear();
        Ok(())
    }

    /// Parses the bundled default for this file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingResource`] if the bundle no longer has
    /// it, or [`StoreError::Document`] if it is malformed.
    pub fn bundled_defaults(&self) -> Result<ConfigSection, StoreError> {
        Ok(read_bundled(self.resources.as_ref(), &self.resource_path)?)
    }

    /// Adds every path present in the bundled default but missing from the
    /// document, without touching existing values.  Returns the added paths.
    ///
    /// The cache is cleared when anything was added.  Call
    /// [`ConfigStore::save`] to persist.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::bundled_defaults`].
    pub fn merge_missing_defaults(&mut self) -> Result<Vec<String>, StoreError> {
        let defaults = self.bundled_defaults()?;
        let added = self.document.merge_missing(&defaults);
        if !added.is_empty() {
            self.cache.clear();
            info!("added {} missing default(s) to {}", added.len(), self.file_name);
        }
        Ok(added)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
