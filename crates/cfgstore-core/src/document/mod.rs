//! Configuration document model.
//!
//! This module contains pure data handling with no file-system access.
//!
//! # Paths (for beginners)
//!
//! Every value in a document is addressed by a **path**: the keys leading to
//! it joined with `.`.  Given
//!
//! ```yaml
//! database:
//!   pool:
//!     size: 8
//! ```
//!
//! the path `database.pool.size` resolves to `8` and `database.pool` resolves
//! to a nested **section** that supports the same lookups relative to itself.

/// Path separator used by every lookup.
pub const PATH_SEPARATOR: char = '.';

/// A single node in the document tree.
pub mod value;

/// Ordered key/value mapping with dotted-path lookups.
///
/// See [`section::ConfigSection`] for the main type.
pub mod section;

/// YAML parsing and rendering.
pub mod yaml;
