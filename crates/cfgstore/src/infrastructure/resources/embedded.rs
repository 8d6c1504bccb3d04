use std::io::{Cursor, Read};

use super::{normalize, ResourceProvider};

/// A static table of bundled resources.
///
/// ```
/// use cfgstore::{EmbeddedResources, ResourceProvider};
///
/// static BUNDLE: EmbeddedResources = EmbeddedResources::new(&[
///     ("config.yml", b"volume: 0.5\n"),
///     ("lang/en.yml", b"greeting: Hello\n"),
/// ]);
///
/// assert!(BUNDLE.open("lang/en.yml").is_some());
/// assert!(BUNDLE.open("/config.yml").is_some());
/// assert!(BUNDLE.open("lang/de.yml").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    entries: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedResources {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// Raw bytes of the resource at `path`.
    pub fn get(&self, path: &str) -> Option<&'static [u8]> {
        let path = normalize(path);
        self.entries
            .iter()
            .find(|(p, _)| normalize(p) == path)
            .map(|(_, bytes)| *bytes)
    }
}

impl ResourceProvider for EmbeddedResources {
    fn open(&self, path: &str) -> Option<Box<dyn Read + Send>> {
        self.get(path)
            .map(|bytes| Box::new(Cursor::new(bytes)) as Box<dyn Read + Send>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BUNDLE: EmbeddedResources = EmbeddedResources::new(&[
        ("config.yml", b"volume: 0.5\n"),
        ("/lang/en.yml", b"greeting: Hello\n"),
    ]);

    #[test]
    fn test_open_reads_full_contents() {
        // Arrange
        let mut reader = BUNDLE.open("config.yml").expect("bundled");

        // Act
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();

        // Assert
        assert_eq!(text, "volume: 0.5\n");
    }

    #[test]
    fn test_leading_slash_is_ignored_on_both_sides() {
        assert!(BUNDLE.get("lang/en.yml").is_some());
        assert!(BUNDLE.get("/config.yml").is_some());
    }

    #[test]
    fn test_missing_resource_is_none() {
        assert!(BUNDLE.open("missing.yml").is_none());
    }
}
