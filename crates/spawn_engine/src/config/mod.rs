//! Configuration system
//!
//! Configuration types load from and save to `.toml` or `.ron` files,
//! chosen by file extension.

pub use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::spawning::{ZeroWeightPolicy, DEFAULT_MAX_SAMPLE_ATTEMPTS};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match format_of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Load configuration from file, falling back to defaults if the file is missing
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match format_of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Format::Toml),
        Some("ron") => Ok(Format::Ron),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning for a spawn coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Draws attempted before the position sampler accepts a repeated position
    pub max_sample_attempts: u32,

    /// What weighted selection does when every weight is zero
    pub zero_weight_policy: ZeroWeightPolicy,

    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            max_sample_attempts: DEFAULT_MAX_SAMPLE_ATTEMPTS,
            zero_weight_policy: ZeroWeightPolicy::Reject,
            seed: None,
        }
    }
}

impl Config for SpawnerConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spawner.toml");

        let config = SpawnerConfig {
            max_sample_attempts: 4,
            zero_weight_policy: ZeroWeightPolicy::Uniform,
            seed: Some(99),
        };
        config.save_to_file(&path).unwrap();

        let loaded = SpawnerConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spawner.ron");
        std::fs::write(&path, "(seed: Some(5))").unwrap();

        let loaded = SpawnerConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.seed, Some(5));
        assert_eq!(loaded.max_sample_attempts, DEFAULT_MAX_SAMPLE_ATTEMPTS);
        assert_eq!(loaded.zero_weight_policy, ZeroWeightPolicy::Reject);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spawner.json");

        let result = SpawnerConfig::default().save_to_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SpawnerConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, SpawnerConfig::default());
    }
}
