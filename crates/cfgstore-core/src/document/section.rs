//! Ordered key/value mapping with dotted-path lookups.
//!
//! A [`ConfigSection`] is both the root of a parsed document and every nested
//! mapping inside it.  Entries keep the order they had in the source file so
//! that a document rendered back to YAML reads the way its author wrote it.
//!
//! # Path resolution
//!
//! `get("a.b.c")` walks `a` and `b` as sections and returns the entry `c` of
//! the innermost one.  If any intermediate node is missing or is not a
//! section, the lookup resolves to nothing.  The empty path names the section
//! itself: `contains("")` is always `true` and `section("")` returns `self`.

use super::value::ConfigValue;
use super::PATH_SEPARATOR;

/// An ordered mapping from keys to [`ConfigValue`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSection {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigSection {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct entries (nested entries are not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over direct entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts a direct entry (no path splitting), keeping the position of an
    /// existing key.  Returns the replaced value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    // ── Path lookups ─────────────────────────────────────────────────────────

    /// Returns the value at `path`, or `None` if nothing is defined there.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        match path.rsplit_once(PATH_SEPARATOR) {
            Some((parent, leaf)) => self.section(parent)?.entry(leaf),
            None => self.entry(path),
        }
    }

    /// Returns `true` if a value (scalar, list, or section) is defined at `path`.
    pub fn contains(&self, path: &str) -> bool {
        path.is_empty() || self.get(path).is_some()
    }

    /// Returns the nested section at `path`, or `None` if the path is absent
    /// or holds a non-section value.
    pub fn section(&self, path: &str) -> Option<&ConfigSection> {
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for segment in path.split(PATH_SEPARATOR) {
            current = current.entry(segment)?.as_section()?;
        }
        Some(current)
    }

    /// Mutable variant of [`ConfigSection::section`].
    pub fn section_mut(&mut self, path: &str) -> Option<&mut ConfigSection> {
        let mut current = self;
        if path.is_empty() {
            return Some(current);
        }
        for segment in path.split(PATH_SEPARATOR) {
            current = match current.entry_mut(segment)? {
                ConfigValue::Section(section) => section,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Sets `value` at `path`, creating intermediate sections as needed.
    ///
    /// An intermediate node that exists but is not a section is replaced by
    /// an empty section.  Setting the empty path is a no-op.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) {
        if path.is_empty() {
            return;
        }
        let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let leaf = segments.pop().unwrap_or(path);
        let mut current = self;
        for segment in segments {
            current = current.child_section_mut(segment);
        }
        current.insert(leaf, value);
    }

    /// Removes and returns the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<ConfigValue> {
        let (parent, leaf) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((parent, leaf)) => (self.section_mut(parent)?, leaf),
            None => (self, path),
        };
        let index = parent.position(leaf)?;
        Some(parent.entries.remove(index).1)
    }

    /// Returns direct keys, or with `deep` every nested path in depth-first
    /// document order (`a`, `a.b`, `a.b.c`, `d`, ...).
    pub fn keys(&self, deep: bool) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_keys("", deep, &mut out);
        out
    }

    /// Copies every path defined in `defaults` but absent here, without
    /// overwriting existing values.  Returns the paths that were added.
    ///
    /// A default nested under a path that holds a non-section value here is
    /// skipped, so a user's scalar is never turned into a section.
    pub fn merge_missing(&mut self, defaults: &ConfigSection) -> Vec<String> {
        let mut added = Vec::new();
        for path in defaults.keys(true) {
            if self.contains(&path) {
                continue;
            }
            let parent_is_section = match path.rsplit_once(PATH_SEPARATOR) {
                Some((parent, _)) => self.section(parent).is_some(),
                None => true,
            };
            if !parent_is_section {
                continue;
            }
            if let Some(value) = defaults.get(&path) {
                self.set(&path, value.clone());
                added.push(path);
            }
        }
        added
    }

    // ── Typed lookups ────────────────────────────────────────────────────────

    /// Integer at `path`, or `def` if absent or not numeric.
    pub fn get_int(&self, path: &str, def: i64) -> i64 {
        self.get(path).and_then(ConfigValue::as_int).unwrap_or(def)
    }

    /// Boolean at `path`, or `def` if absent or not a boolean.
    pub fn get_bool(&self, path: &str, def: bool) -> bool {
        self.get(path).and_then(ConfigValue::as_bool).unwrap_or(def)
    }

    /// Float at `path`, or `def` if absent or not numeric.
    pub fn get_double(&self, path: &str, def: f64) -> f64 {
        self.get(path).and_then(ConfigValue::as_double).unwrap_or(def)
    }

    /// Scalar at `path` rendered as text, or `def` if absent, a list, or a
    /// section.
    pub fn get_string(&self, path: &str, def: &str) -> String {
        self.get(path)
            .and_then(ConfigValue::as_string)
            .unwrap_or_else(|| def.to_string())
    }

    /// Integer elements of the list at `path`; unconvertible elements are
    /// skipped and a missing or non-list value yields an empty list.
    pub fn get_int_list(&self, path: &str) -> Vec<i64> {
        self.list(path).iter().filter_map(ConfigValue::int_element).collect()
    }

    pub fn get_bool_list(&self, path: &str) -> Vec<bool> {
        self.list(path).iter().filter_map(ConfigValue::bool_element).collect()
    }

    pub fn get_double_list(&self, path: &str) -> Vec<f64> {
        self.list(path)
            .iter()
            .filter_map(ConfigValue::double_element)
            .collect()
    }

    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        self.list(path)
            .iter()
            .filter_map(ConfigValue::string_element)
            .collect()
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn list(&self, path: &str) -> &[ConfigValue] {
        self.get(path).and_then(ConfigValue::as_list).unwrap_or(&[])
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn entry(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn child_section_mut(&mut self, key: &str) -> &mut ConfigSection {
        let index = match self.position(key) {
            Some(index) => index,
            None => {
                self.entries
                    .push((key.to_string(), ConfigValue::Section(ConfigSection::new())));
                self.entries.len() - 1
            }
        };
        let slot = &mut self.entries[index].1;
        if !matches!(slot, ConfigValue::Section(_)) {
            *slot = ConfigValue::Section(ConfigSection::new());
        }
        match slot {
            ConfigValue::Section(section) => section,
            _ => unreachable!("slot was just replaced with a section"),
        }
    }

    fn collect_keys(&self, prefix: &str, deep: bool, out: &mut Vec<String>) {
        for (key, value) in &self.entries {
            let full = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}{PATH_SEPARATOR}{key}")
            };
            out.push(full.clone());
            if deep {
                if let ConfigValue::Section(child) = value {
                    child.collect_keys(&full, deep, out);
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds:
    /// ```yaml
    /// volume: 0.5
    /// database:
    ///   pool:
    ///     size: 8
    ///   host: localhost
    /// tags: [a, b]
    /// ```
    fn sample() -> ConfigSection {
        let mut root = ConfigSection::new();
        root.set("volume", 0.5);
        root.set("database.pool.size", 8i64);
        root.set("database.host", "localhost");
        root.set("tags", vec!["a", "b"]);
        root
    }

    // ── Path lookups ──────────────────────────────────────────────────────────

    #[test]
    fn test_get_resolves_nested_path() {
        // Arrange
        let root = sample();

        // Act
        let value = root.get("database.pool.size");

        // Assert
        assert_eq!(value, Some(&ConfigValue::Int(8)));
    }

    #[test]
    fn test_get_through_non_section_is_none() {
        let root = sample();
        assert_eq!(root.get("volume.inner"), None);
    }

    #[test]
    fn test_contains_sections_and_scalars() {
        let root = sample();
        assert!(root.contains("database"));
        assert!(root.contains("database.pool"));
        assert!(root.contains("tags"));
        assert!(!root.contains("database.port"));
    }

    #[test]
    fn test_empty_path_names_the_section_itself() {
        let root = sample();
        assert!(root.contains(""));
        assert_eq!(root.section(""), Some(&root));
    }

    #[test]
    fn test_section_of_scalar_is_none() {
        let root = sample();
        assert!(root.section("volume").is_none());
        assert_eq!(root.section("database.pool").map(ConfigSection::len), Some(1));
    }

    #[test]
    fn test_set_preserves_insertion_order_and_position_on_replace() {
        // Arrange
        let mut root = sample();

        // Act
        root.set("volume", 0.8);

        // Assert
        assert_eq!(root.keys(false), vec!["volume", "database", "tags"]);
        assert_eq!(root.get_double("volume", 0.0), 0.8);
    }

    #[test]
    fn test_set_replaces_scalar_intermediate_with_section() {
        let mut root = sample();
        root.set("volume.music", 0.3);
        assert_eq!(root.get_double("volume.music", 0.0), 0.3);
    }

    #[test]
    fn test_set_empty_path_is_noop() {
        let mut root = sample();
        root.set("", 1i64);
        assert_eq!(root, sample());
    }

    #[test]
    fn test_remove_nested_value() {
        let mut root = sample();
        let removed = root.remove("database.host");
        assert_eq!(removed, Some(ConfigValue::from("localhost")));
        assert!(!root.contains("database.host"));
        assert!(root.contains("database.pool.size"));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut root = sample();
        assert_eq!(root.remove("nope.nested"), None);
    }

    #[test]
    fn test_deep_keys_are_depth_first() {
        let root = sample();
        assert_eq!(
            root.keys(true),
            vec![
                "volume",
                "database",
                "database.pool",
                "database.pool.size",
                "database.host",
                "tags"
            ]
        );
    }

    // ── Typed lookups ─────────────────────────────────────────────────────────

    #[test]
    fn test_typed_getters_fall_back_to_default_when_absent() {
        let root = sample();
        assert_eq!(root.get_int("max-retries", 3), 3);
        assert!(root.get_bool("enabled", true));
        assert_eq!(root.get_double("pitch", 1.5), 1.5);
        assert_eq!(root.get_string("missing", "x"), "x");
    }

    #[test]
    fn test_typed_getter_default_when_wrong_type() {
        let root = sample();
        assert_eq!(root.get_int("database.host", 7), 7);
        assert_eq!(root.get_string("tags", "none"), "none");
    }

    #[test]
    fn test_get_string_stringifies_numbers() {
        let root = sample();
        assert_eq!(root.get_string("database.pool.size", ""), "8");
    }

    #[test]
    fn test_list_getters() {
        // Arrange
        let mut root = ConfigSection::new();
        root.set(
            "mixed",
            ConfigValue::List(vec![
                ConfigValue::Int(1),
                ConfigValue::from("2"),
                ConfigValue::Float(3.7),
                ConfigValue::from("x"),
                ConfigValue::Bool(true),
            ]),
        );

        // Act / Assert
        assert_eq!(root.get_int_list("mixed"), vec![1, 2, 3]);
        assert_eq!(root.get_double_list("mixed"), vec![1.0, 2.0, 3.7]);
        assert_eq!(root.get_bool_list("mixed"), vec![true]);
        assert_eq!(
            root.get_string_list("mixed"),
            vec!["1", "2", "3.7", "x", "true"]
        );
    }

    #[test]
    fn test_list_getter_on_scalar_is_empty() {
        let root = sample();
        assert!(root.get_string_list("volume").is_empty());
        assert!(root.get_int_list("absent").is_empty());
    }

    // ── merge_missing ─────────────────────────────────────────────────────────

    #[test]
    fn test_merge_missing_adds_only_absent_paths() {
        // Arrange
        let mut user = ConfigSection::new();
        user.set("volume", 0.9);
        let mut defaults = sample();
        defaults.set("database.port", 5432i64);

        // Act
        let added = user.merge_missing(&defaults);

        // Assert
        assert_eq!(added, vec!["database", "tags"]);
        assert_eq!(user.get_double("volume", 0.0), 0.9);
        assert_eq!(user.get_int("database.port", 0), 5432);
    }

    #[test]
    fn test_merge_missing_fills_nested_gaps() {
        let mut user = ConfigSection::new();
        user.set("database.host", "db.internal");
        let added = user.merge_missing(&sample());
        assert_eq!(added, vec!["volume", "database.pool", "tags"]);
        assert_eq!(user.get_string("database.host", ""), "db.internal");
    }

    #[test]
    fn test_merge_missing_never_turns_scalar_into_section() {
        let mut user = ConfigSection::new();
        user.set("database", "sqlite");
        user.merge_missing(&sample());
        assert_eq!(user.get_string("database", ""), "sqlite");
    }
}
