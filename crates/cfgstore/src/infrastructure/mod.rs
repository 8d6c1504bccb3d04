//! Infrastructure layer.
//!
//! Contains the adapters that touch the outside world: the plugin host that
//! owns the data directory, the providers of bundled default resources, and
//! file-system storage for the on-disk YAML copy.
//!
//! **Dependency rule**: this layer may depend on `cfgstore_core`, but MUST
//! NOT import from `application`.

pub mod host;
pub mod resources;
pub mod storage;
