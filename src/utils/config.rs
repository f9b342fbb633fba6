//! Configuration management
//!
//! Memory dimensions and validation settings, loaded from TOML.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::memory::{ZeroKeyPolicy, WEIGHT_TOLERANCE};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Memory bank configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of memory locations (N)
    pub locations: usize,
    /// Width of each location (M)
    pub width: usize,
    /// Allowed deviation of a weighting's sum from one
    pub weight_tolerance: f64,
    /// Handling of all-zero keys in content addressing
    pub zero_key: ZeroKeyPolicy,
    pub logging: LoggingConfig,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            locations: 128,
            width: 20,
            weight_tolerance: WEIGHT_TOLERANCE,
            zero_key: ZeroKeyPolicy::Reject,
            logging: LoggingConfig::default(),
        }
    }
}

impl MemoryConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MemoryConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file or use default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the dimensions and tolerance are usable
    pub fn validate(&self) -> Result<()> {
        ensure!(self.locations > 0, "memory needs at least one location");
        ensure!(self.width > 0, "memory locations need a positive width");
        ensure!(
            self.weight_tolerance.is_finite() && self.weight_tolerance > 0.0,
            "weight tolerance must be positive, got {}",
            self.weight_tolerance
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = MemoryConfig::default();
        assert_eq!(config.locations, 128);
        assert_eq!(config.width, 20);
        assert_eq!(config.weight_tolerance, 1e-6);
        assert_eq!(config.zero_key, ZeroKeyPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = MemoryConfig {
            zero_key: ZeroKeyPolicy::Uniform,
            ..MemoryConfig::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: MemoryConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.locations, config.locations);
        assert_eq!(parsed.zero_key, ZeroKeyPolicy::Uniform);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: MemoryConfig = toml::from_str("locations = 16\nzero_key = \"uniform\"").unwrap();
        assert_eq!(parsed.locations, 16);
        assert_eq!(parsed.width, 20);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MemoryConfig {
            width: 0,
            ..MemoryConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MemoryConfig {
            weight_tolerance: -1.0,
            ..MemoryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("ntm-memory-config-{}.toml", std::process::id()));
        let config = MemoryConfig {
            locations: 32,
            width: 8,
            ..MemoryConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = MemoryConfig::load(&path).unwrap();
        assert_eq!(loaded.locations, 32);
        assert_eq!(loaded.width, 8);

        std::fs::remove_file(&path).unwrap();
        assert_eq!(MemoryConfig::load_or_default(&path).locations, 128);
    }
}
