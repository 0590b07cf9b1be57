//! Configuration for backup rotation.
//!
//! Loads configuration from a TOML file; individual values can be overridden
//! on the command line. The retention policy is carried as one immutable
//! value all the way into the evaluator, there are no implicit defaults
//! consulted at decision time.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::errors::{Result, RotateError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backup: BackupConfig,

    #[serde(default)]
    pub retention: RetentionConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Directory to archive
    pub src_dir: PathBuf,

    /// Directory holding the timestamped archives
    pub backup_dir: PathBuf,

    /// Filename prefix identifying archives managed by this tool
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Gzip-compress new archives
    #[serde(default)]
    pub compress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Target number of retained backups (must be >= 2)
    #[serde(default = "default_max_kept")]
    pub max_kept: usize,

    /// Nominal spacing between backup runs, in seconds
    #[serde(default = "default_interval_secs")]
    pub expected_interval_secs: i64,

    /// Age beyond which the oldest backup is force-evicted, in seconds
    #[serde(default = "default_outdated_secs")]
    pub outdated_age_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_prefix() -> String {
    "backup".to_string()
}

fn default_max_kept() -> usize {
    14
}

fn default_interval_secs() -> i64 {
    3600 // 1 hour
}

fn default_outdated_secs() -> i64 {
    2_457_600 // ~4 weeks
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RetentionConfig {
    fn default() -> Self {
        RetentionConfig {
            max_kept: default_max_kept(),
            expected_interval_secs: default_interval_secs(),
            outdated_age_secs: default_outdated_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

impl RetentionConfig {
    pub fn expected_interval(&self) -> Duration {
        Duration::seconds(self.expected_interval_secs)
    }

    pub fn outdated_age(&self) -> Duration {
        Duration::seconds(self.outdated_age_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject values the retention logic cannot operate on.
    pub fn validate(&self) -> Result<()> {
        if self.backup.src_dir.as_os_str().is_empty() {
            return Err(RotateError::Config("src_dir must be set".to_string()));
        }
        if self.backup.backup_dir.as_os_str().is_empty() {
            return Err(RotateError::Config("backup_dir must be set".to_string()));
        }
        if self.backup.prefix.is_empty() {
            return Err(RotateError::Config("prefix must not be empty".to_string()));
        }
        if self.retention.max_kept < 2 {
            return Err(RotateError::Config(format!(
                "max_kept must be at least 2, got {}",
                self.retention.max_kept
            )));
        }
        if self.retention.expected_interval_secs <= 0 {
            return Err(RotateError::Config(format!(
                "expected_interval_secs must be positive, got {}",
                self.retention.expected_interval_secs
            )));
        }
        if self.retention.outdated_age_secs <= 0 {
            return Err(RotateError::Config(format!(
                "outdated_age_secs must be positive, got {}",
                self.retention.outdated_age_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            backup: BackupConfig {
                src_dir: PathBuf::from("/data"),
                backup_dir: PathBuf::from("/backups"),
                prefix: default_prefix(),
                compress: false,
            },
            retention: RetentionConfig::default(),
            log: LogConfig::default(),
        }
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [backup]
            src_dir = "/data"
            backup_dir = "/backups"
            "#,
        )
        .unwrap();

        assert_eq!(config.backup.prefix, "backup");
        assert!(!config.backup.compress);
        assert_eq!(config.retention.max_kept, 14);
        assert_eq!(config.retention.expected_interval_secs, 3600);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_full_toml() {
        let config: Config = toml::from_str(
            r#"
            [backup]
            src_dir = "/srv/www"
            backup_dir = "/srv/backups"
            prefix = "www"
            compress = true

            [retention]
            max_kept = 7
            expected_interval_secs = 86400
            outdated_age_secs = 31536000

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.backup.prefix, "www");
        assert!(config.backup.compress);
        assert_eq!(config.retention.max_kept, 7);
        assert_eq!(config.retention.outdated_age_secs, 31_536_000);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_small_max_kept() {
        let mut config = base_config();
        config.retention.max_kept = 1;
        assert!(matches!(config.validate(), Err(RotateError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = base_config();
        config.retention.expected_interval_secs = 0;
        assert!(matches!(config.validate(), Err(RotateError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_dirs() {
        let mut config = base_config();
        config.backup.backup_dir = PathBuf::new();
        assert!(matches!(config.validate(), Err(RotateError::Config(_))));
    }
}
