//! Plugin host abstraction.
//!
//! The host runtime (the game server, in the usual deployment) decides where
//! each installed plugin keeps its files.  Stores only need that directory,
//! so the host is reduced to the [`PluginHost`] trait and the lifecycle that
//! created it stays the host's business.

use std::path::{Path, PathBuf};

/// Supplies the per-installation data directory of a plugin.
#[cfg_attr(test, mockall::automock)]
pub trait PluginHost {
    /// Plugin name, used only for log context.
    fn name(&self) -> String;

    /// Base directory under which config files are stored.
    fn data_dir(&self) -> PathBuf;
}

/// A host with a fixed name and data directory.
///
/// Used by the CLI and by embedders that already know where their files go.
#[derive(Debug, Clone)]
pub struct DataDirHost {
    name: String,
    data_dir: PathBuf,
}

impl DataDirHost {
    pub fn new(name: impl Into<String>, data_dir: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }
}

impl PluginHost for DataDirHost {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_host_returns_configured_values() {
        let host = DataDirHost::new("shop", "/srv/plugins/shop");
        assert_eq!(host.name(), "shop");
        assert_eq!(host.data_dir(), PathBuf::from("/srv/plugins/shop"));
    }
}
