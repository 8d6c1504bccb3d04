//! # cfgstore-core
//!
//! Shared library for cfgstore containing the configuration document model,
//! the YAML codec, and the text formatting used for string values.
//!
//! It has zero dependencies on the file system, the plugin host, or any
//! bundled resources.  Those live in the `cfgstore` crate.
//!
//! # Architecture overview (for beginners)
//!
//! A plugin reads its settings from a YAML file such as:
//!
//! ```yaml
//! messages:
//!   prefix: "&8[&bShop&8] "
//! volume: 0.5
//! tags: [a, b]
//! ```
//!
//! This crate turns that text into a tree you can query with dotted paths
//! (`"messages.prefix"`), and defines how raw values are coerced into the
//! typed results callers ask for.
//!
//! - **`document`**: The tree itself: [`ConfigSection`] holds ordered
//!   key/value entries, [`ConfigValue`] is a single node.  The `yaml`
//!   sub-module parses and renders the tree.
//!
//! - **`text`**: The [`TextFormatter`] seam applied to string values, plus
//!   the legacy `&`-colour-code translator used by default.

pub mod document;
pub mod text;

// Re-export the most-used types at the crate root so callers can write
// `cfgstore_core::ConfigSection` instead of the full module path.
pub use document::section::ConfigSection;
pub use document::value::ConfigValue;
pub use document::yaml::{parse_document, to_yaml_string, DocumentError};
pub use text::{translate_color_codes, LegacyColorFormatter, PlainText, TextFormatter};
