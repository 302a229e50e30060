use reanchor_engine::{AnchorOptions, QuoteOptions, ScoreWeights};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid [weights] in config file at {config_path}: {reason}")]
    InvalidWeights {
        config_path: PathBuf,
        reason: &'static str,
    },
}

/// Tuning for describing and re-anchoring quotes. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Characters of context recorded on each side of a quote.
    pub context_len: usize,
    /// Ceiling on the approximate-search error budget.
    pub max_quote_errors: usize,
    pub weights: ScoreWeights,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = AnchorOptions::default();
        Self {
            context_len: defaults.context_len,
            max_quote_errors: defaults.quote.max_errors,
            weights: defaults.quote.weights,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .weights
            .validate()
            .map_err(|reason| ConfigError::InvalidWeights {
                config_path: config_path.to_path_buf(),
                reason,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// The engine options these settings describe.
    pub fn anchor_options(&self) -> AnchorOptions {
        AnchorOptions {
            context_len: self.context_len,
            quote: QuoteOptions {
                max_errors: self.max_quote_errors,
                weights: self.weights,
            },
        }
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/reanchor");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/reanchor/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.context_len, 32);
        assert_eq!(config.max_quote_errors, 256);
        assert_eq!(config.weights.quote, 50.0);
        assert_eq!(config.anchor_options(), AnchorOptions::default());
    }

    #[test]
    fn test_partial_weights_keep_other_defaults() {
        let config_content = r#"
context_len = 16

[weights]
position = 10.0
"#;
        let config: Config = toml::from_str(config_content).unwrap();
        assert_eq!(config.context_len, 16);
        assert_eq!(config.max_quote_errors, 256);
        assert_eq!(
            config.weights,
            ScoreWeights {
                position: 10.0,
                ..ScoreWeights::default()
            }
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_config_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "context_len = \"lots\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_unusable_weights_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        for (content, expected) in [
            (
                "[weights]\nquote = 0.0\nprefix = 0.0\nsuffix = 0.0\nposition = 0.0\n",
                "weights must not all be zero",
            ),
            ("[weights]\nprefix = -20.0\n", "weights must not be negative"),
        ] {
            std::fs::write(&config_file, content).unwrap();
            let err = Config::load_from_path(&config_file).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidWeights { reason, .. } if *reason == expected),
                "{content:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_anchor_options_carry_settings() {
        let config = Config {
            context_len: 8,
            max_quote_errors: 4,
            weights: ScoreWeights {
                position: 0.0,
                ..ScoreWeights::default()
            },
        };
        let options = config.anchor_options();
        assert_eq!(options.context_len, 8);
        assert_eq!(options.quote.max_errors, 4);
        assert_eq!(options.quote.weights, config.weights);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            context_len: 8,
            max_quote_errors: 12,
            weights: ScoreWeights {
                quote: 1.0,
                prefix: 2.0,
                suffix: 3.0,
                position: 4.0,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
