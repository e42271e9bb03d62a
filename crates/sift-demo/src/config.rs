//! Demo configuration, loaded from YAML.
//!
//! Every field is optional; a missing file section falls back to the
//! default.
//!
//! ```yaml
//! seed: 7
//! people: 40
//! locations: 500
//! paging:
//!   default_size: 20
//!   max_size: 100
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sift::PageLimits;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid page limits: default size {default_size}, max size {max_size}")]
    PageLimits {
        default_size: usize,
        max_size: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Seed for the synthetic data.
    pub seed: u64,
    /// Number of people to generate.
    pub people: usize,
    /// Number of locations to generate.
    pub locations: usize,
    pub paging: PageLimits,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            seed: 42,
            people: 25,
            locations: 250,
            paging: PageLimits::default(),
        }
    }
}

impl DemoConfig {
    /// Reads and validates a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DemoConfig =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// The config at `path`, or the defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let PageLimits {
            default_size,
            max_size,
        } = self.paging;
        if default_size == 0 || default_size > max_size {
            return Err(ConfigError::PageLimits {
                default_size,
                max_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<DemoConfig, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse("{}").unwrap(), DemoConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = parse("seed: 7\npaging:\n  max_size: 100\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.people, 25);
        assert_eq!(config.paging.max_size, 100);
        assert_eq!(config.paging.default_size, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("sede: 7").is_err());
    }

    #[test]
    fn inconsistent_limits_fail_validation() {
        let config = parse("paging:\n  default_size: 80\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PageLimits {
                default_size: 80,
                max_size: 50
            })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = DemoConfig::load(Path::new("/nonexistent/sift-demo.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/sift-demo.yaml"));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(
            DemoConfig::load_or_default(None).unwrap(),
            DemoConfig::default()
        );
    }
}
