//! Configuration loading and typed config structures for Wayfinder.
//!
//! The configuration lives in a YAML file (`wayfinder.yaml` by convention).
//! This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file and applies
//! environment overrides. Every field has a default, so an empty file is a
//! valid configuration.

use std::path::Path;

use serde::Deserialize;
use wayfinder_graph::{
    DEFAULT_MAX_DEPTH, LevelFolding, MAX_DEPTH_LIMIT, ResolverSettings, WarpOverride,
    WarpOverrides,
};

/// Environment variable overriding `graph.max_depth`.
pub const MAX_DEPTH_ENV: &str = "WAYFINDER_MAX_DEPTH";

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

    /// A value parsed but is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Wayfinder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WayfinderConfig {
    /// Resolver limits.
    #[serde(default)]
    pub graph: GraphConfig,

    /// Generated-level folding rules.
    #[serde(default)]
    pub levels: LevelFolding,

    /// Warp substitution table. Replaces the built-in table when present.
    #[serde(default = "default_warp_overrides")]
    pub warp_overrides: Vec<WarpOverride>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for WayfinderConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            levels: LevelFolding::default(),
            warp_overrides: default_warp_overrides(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WayfinderConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `WAYFINDER_MAX_DEPTH` overrides `graph.max_depth`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with_env(yaml, |key| std::env::var(key).ok())
    }

    /// Parse configuration from a YAML string, reading overrides through
    /// `env` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`WayfinderConfig::parse`].
    pub fn parse_with_env(
        yaml: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not to an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.graph.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.max_depth == 0 {
            return Err(ConfigError::Invalid {
                reason: "graph.max_depth must be at least 1".to_owned(),
            });
        }
        if self.graph.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "graph.max_depth must be at most {MAX_DEPTH_LIMIT}, got {}",
                    self.graph.max_depth
                ),
            });
        }
        if self.levels.mine_prefix.is_empty() || self.levels.volcano_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "level prefixes must not be empty".to_owned(),
            });
        }
        Ok(())
    }

    /// Resolver settings derived from this configuration.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            max_depth: self.graph.max_depth,
            levels: self.levels.clone(),
            overrides: WarpOverrides::new(self.warp_overrides.clone()),
        }
    }
}

/// Resolver limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphConfig {
    /// Recursion ceiling for the root-mapping descent, from 1 to
    /// [`MAX_DEPTH_LIMIT`].
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl GraphConfig {
    /// Apply environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `WAYFINDER_MAX_DEPTH` is set but
    /// is not a non-negative integer.
    pub fn apply_env_overrides(
        &mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = env(MAX_DEPTH_ENV) {
            self.max_depth = val.trim().parse().map_err(|e| ConfigError::Invalid {
                reason: format!("{MAX_DEPTH_ENV}={val}: {e}"),
            })?;
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
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

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_warp_overrides() -> Vec<WarpOverride> {
    WarpOverrides::default().iter().cloned().collect()
}
