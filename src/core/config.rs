//! Optional per-repository configuration
//!
//! Read from `.git-cp.yaml` at the repository root. Every key is optional;
//! CLI flags and environment variables override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Config file name, looked up at the repository root
pub const CONFIG_FILE: &str = ".git-cp.yaml";

/// Default number of commits listed from the source branch
pub const DEFAULT_LIMIT: usize = 60;

/// Default push remote
pub const DEFAULT_REMOTE: &str = "origin";

/// Errors that can occur when loading the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// What to do about pushing once commits were applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PushPolicy {
    /// Ask for confirmation
    #[default]
    Ask,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Max commits listed from the source branch
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Remote the target branch is pushed to
    #[serde(default = "default_remote")]
    pub remote: String,
    #[serde(default)]
    pub push: PushPolicy,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            remote: default_remote(),
            push: PushPolicy::default(),
        }
    }
}

impl Config {
    /// Parse config YAML and validate it
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.git-cp.yaml` from `repo_root`, or defaults if absent
    pub fn load(repo_root: &Path) -> Result<Self, ConfigError> {
        let path = repo_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::Validation(
                "limit must be at least 1".to_string(),
            ));
        }
        if self.remote.trim().is_empty() || self.remote.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "invalid remote name '{}'",
                self.remote
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limit, 60);
        assert_eq!(config.remote, "origin");
        assert_eq!(config.push, PushPolicy::Ask);
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("limit: 15\npush: never\n").unwrap();
        assert_eq!(config.limit, 15);
        assert_eq!(config.remote, "origin");
        assert_eq!(config.push, PushPolicy::Never);
    }

    #[test]
    fn test_load_from_repo_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "remote: upstream\n").unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.remote, "upstream");
    }

    #[test]
    fn test_rejects_zero_limit() {
        assert!(matches!(
            Config::parse("limit: 0"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_blank_remote() {
        assert!(Config::parse("remote: ''").is_err());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            Config::parse("limt: 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("\n").unwrap(), Config::default());
    }
}
