//! Registry configuration, read from the `[registry]` section of a TOML file.
//!
//! ```toml
//! [registry]
//! max_search_depth = 64
//! size_warning_threshold = 10000
//! cache_fallback = true
//! repair_on_resolve = true
//! ```

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Nesting levels below a top-level entry that lookups descend into.
    #[serde(default = "default_max_search_depth")]
    pub max_search_depth: usize,
    /// Entry count at which a warning is logged.
    #[serde(default = "default_size_warning_threshold")]
    pub size_warning_threshold: usize,
    #[serde(default = "default_true")]
    pub cache_fallback: bool,
    #[serde(default = "default_true")]
    pub repair_on_resolve: bool,
}

fn default_max_search_depth() -> usize {
    64
}

fn default_size_warning_threshold() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_search_depth: default_max_search_depth(),
            size_warning_threshold: default_size_warning_threshold(),
            cache_fallback: true,
            repair_on_resolve: true,
        }
    }
}

impl RegistryConfig {
    /// Parses the contents of a configuration file.
    pub fn from_toml_str(contents: &str) -> RegistryResult<Self> {
        let file: RegistryFile =
            toml::from_str(contents).map_err(|e| RegistryError::Config(e.to_string()))?;
        file.registry.validated()
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults. An unreadable or invalid file
    /// also yields the defaults, with a warning.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No registry config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded registry config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("{e} in {:?}. Falling back to defaults.", path);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read registry config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    fn validated(self) -> RegistryResult<Self> {
        if self.size_warning_threshold == 0 {
            return Err(RegistryError::Config(
                "size_warning_threshold must be at least 1".into(),
            ));
        }
        Ok(self)
    }
}

/// Raw TOML structure of the config file.
#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default)]
    registry: RegistryConfig,
}
