//! Configuration loading and typed config structures for deployment.
//!
//! The configuration lives in `deploy-config.yaml` at the project root.
//! Every field has a default, so an empty file (or none at all) yields a
//! working setup with block protection switched off.

use std::path::Path;

use deploy_agents::OperatorProxy;
use deploy_types::BlockPos;
use deploy_world::{PermissionGate, Region, SpawnProtection, World, WorldBounds};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level deployment configuration.
///
/// Mirrors the structure of `deploy-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeployConfig {
    /// Consult the permission gate before placing.
    #[serde(default)]
    pub obey_block_protection: bool,

    /// How far in front of the agent entities can be reached, in blocks.
    #[serde(default = "default_entity_reach")]
    pub entity_reach: f64,

    /// World settings for the reference world.
    #[serde(default)]
    pub world: WorldConfig,

    /// Protected areas enforced when `obey_block_protection` is set.
    #[serde(default)]
    pub protection: ProtectionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            obey_block_protection: false,
            entity_reach: default_entity_reach(),
            world: WorldConfig::default(),
            protection: ProtectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DeployConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Reference world configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Vertical build limits.
    #[serde(default)]
    pub bounds: WorldBounds,

    /// Seed for dropped item jitter and other world randomness.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::default(),
            seed: default_seed(),
        }
    }
}

/// Protected areas.
///
/// Acts as the permission gate built from configuration: an edit is
/// allowed unless spawn protection or one of the regions covers it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProtectionConfig {
    /// Square protected around the world spawn.
    #[serde(default)]
    pub spawn: Option<SpawnProtection>,

    /// Claimed regions.
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl PermissionGate for ProtectionConfig {
    fn is_editable(&self, _world: &dyn World, position: BlockPos, _requester: &OperatorProxy) -> bool {
        let spawn = self.spawn.is_some_and(|s| s.covers(position));
        !spawn && !self.regions.iter().any(|r| r.contains(position))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_entity_reach() -> f64 {
    1.5
}

const fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_owned()
}
