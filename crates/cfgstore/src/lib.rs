//! cfgstore library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Quick start
//!
//! ```no_run
//! use cfgstore::{ConfigStore, DataDirHost, EmbeddedResources};
//!
//! static RESOURCES: EmbeddedResources =
//!     EmbeddedResources::new(&[("config.yml", b"volume: 0.5\n")]);
//!
//! # fn main() -> Result<(), cfgstore::StoreError> {
//! let host = DataDirHost::new("shop", "plugins/shop");
//! let store = ConfigStore::open("config", &host, "", &RESOURCES)?;
//! assert_eq!(store.get_double("volume"), 0.5);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod infrastructure;

pub use application::config_store::{ConfigStore, ConfigStoreBuilder, StoreError};
pub use infrastructure::host::{DataDirHost, PluginHost};
pub use infrastructure::resources::{DirectoryResources, EmbeddedResources, ResourceProvider};

pub use cfgstore_core::{ConfigSection, ConfigValue};
