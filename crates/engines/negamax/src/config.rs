//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! depth = 4
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DEPTH: u8 = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Construction-time settings for [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fixed search depth in plies, before quiescence.
    pub depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn with_depth(depth: u8) -> Result<Self, ConfigError> {
        let config = Self { depth };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
