use std::fs;
use std::path::Path;

use grid_types::Connectivity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Thresholds used when a classified structure type leaves them open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub default_connectivity: Connectivity,
    pub min_column_run: usize,
    pub min_row_run: usize,
    pub min_block_height: usize,
    pub min_block_width: usize,
    /// Enables the plus-to-cross rewrite when recognition finds nothing.
    pub legacy_fallback: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_connectivity: Connectivity::Four,
            min_column_run: 3,
            min_row_run: 3,
            min_block_height: 2,
            min_block_width: 2,
            legacy_fallback: true,
        }
    }
}

impl ResolverConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Rejects zero thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_column_run", self.min_column_run),
            ("min_row_run", self.min_row_run),
            ("min_block_height", self.min_block_height),
            ("min_block_width", self.min_block_width),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must be > 0"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use grid_types::Connectivity;

    use super::{ConfigError, ResolverConfig};

    #[test]
    fn missing_fields_take_defaults() {
        let config = ResolverConfig::from_json_str(r#"{"min_row_run": 5}"#).expect("valid");
        assert_eq!(config.min_row_run, 5);
        assert_eq!(config.min_column_run, 3);
        assert_eq!(config.default_connectivity, Connectivity::Four);
        assert!(config.legacy_fallback);
    }

    #[test]
    fn eight_connectivity_and_disabled_fallback() {
        let json = r#"{"default_connectivity": 8, "legacy_fallback": false}"#;
        let config = ResolverConfig::from_json_str(json).expect("valid");
        assert_eq!(config.default_connectivity, Connectivity::Eight);
        assert!(!config.legacy_fallback);
    }

    #[test]
    fn zero_thresholds_and_bad_connectivity_are_rejected() {
        assert!(matches!(
            ResolverConfig::from_json_str(r#"{"min_block_width": 0}"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ResolverConfig::from_json_str(r#"{"default_connectivity": 6}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
