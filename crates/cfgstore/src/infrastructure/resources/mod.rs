//! Providers of bundled default resources.
//!
//! A plugin ships a default copy of each config file inside its artifact.
//! When a store finds no on-disk copy it asks a [`ResourceProvider`] for the
//! bundled bytes and seeds the data directory from them.
//!
//! Resource paths always use `/` separators and are relative to the bundle
//! root (`lang/en.yml`).  A leading `/` is accepted and ignored.
//!
//! Two implementations are provided:
//!
//! - [`EmbeddedResources`]: a static table, typically filled with
//!   `include_bytes!` so the defaults are compiled into the plugin.
//! - [`DirectoryResources`]: files under a directory on disk, used by the
//!   CLI and during development.

use std::io::Read;
use std::sync::Arc;

mod directory;
mod embedded;

pub use directory::DirectoryResources;
pub use embedded::EmbeddedResources;

/// Locates bundled resources by path.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceProvider: Send + Sync {
    /// Opens the resource at `path`, or returns `None` if the bundle has no
    /// such resource.
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>>;
}

impl<R: ResourceProvider + ?Sized> ResourceProvider for &R {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        (**self).open(path)
    }
}

impl<R: ResourceProvider + ?Sized> ResourceProvider for Arc<R> {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        (**self).open(path)
    }
}

impl<R: ResourceProvider + ?Sized> ResourceProvider for Box<R> {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        (**self).open(path)
    }
}

/// Strips the optional leading `/` from a resource path.
pub(crate) fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}
