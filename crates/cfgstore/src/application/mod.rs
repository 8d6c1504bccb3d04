//! Application layer.
//!
//! [`config_store::ConfigStore`] is the type plugins hold on to: it wires the
//! document model from `cfgstore_core` to the storage and resource adapters
//! in `infrastructure`, and keeps a cache of coerced values in front of the
//! document.

pub(crate) mod cache;
pub mod config_store;
