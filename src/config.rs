//! Scene configuration loaded from TOML.
//!
//! Every section and field is optional; anything missing falls back to the
//! generator defaults.
//!
//! ```toml
//! [island]
//! detail = 4
//! jitter = 0.25
//!
//! [cluster]
//! children_per_round = 3
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rocks::{ClusterConfig, SpireConfig};
use crate::terrain::IslandConfig;

/// Errors that can occur while loading a scene configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for every generator, grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub island: IslandConfig,
    pub spire: SpireConfig,
    pub cluster: ClusterConfig,
}

impl SceneConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
