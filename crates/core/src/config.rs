use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LOG_DIR: &str = ".ahon/logs";

/// What to do when the cancellation token fires while a page initializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializePolicy {
    /// Keep the partially initialized page and make it current anyway.
    #[default]
    BestEffort,
    /// Tear the new page down and stay idle.
    Atomic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Name recorded on the navigator's tracing span.
    pub name: String,
    /// Upper bound for each teardown phase of a page.
    pub teardown_timeout_ms: u64,
    pub initialize_policy: InitializePolicy,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            teardown_timeout_ms: 5_000,
            initialize_policy: InitializePolicy::default(),
        }
    }
}

impl NavigatorConfig {
    pub fn teardown_timeout(&self) -> Duration {
        Duration::from_millis(self.teardown_timeout_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory; `~/.ahon/logs` when unset.
    pub directory: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Mirror log output to stderr.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            default_filter: "info".to_string(),
            stderr: false,
        }
    }
}

impl LoggingConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_LOG_DIR)
        })
    }
}

/// Top-level configuration of the application shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub logging: LoggingConfig,
    pub navigator: NavigatorConfig,
    /// Page shown first when nothing else is requested.
    pub start_page: Option<String>,
}

impl ShellConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = ShellConfig::from_json_str(r#"{"navigator": {"initialize_policy": "atomic"}}"#)
            .unwrap();

        assert_eq!(config.navigator.initialize_policy, InitializePolicy::Atomic);
        assert_eq!(config.navigator.name, "main");
        assert_eq!(config.navigator.teardown_timeout_ms, 5_000);
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.start_page, None);
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = NavigatorConfig {
            teardown_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.teardown_timeout(), Duration::from_millis(1));
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ShellConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("shell.json"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.json");
        std::fs::write(
            &path,
            r#"{"start_page": "dashboard", "logging": {"stderr": true}}"#,
        )
        .unwrap();

        let config = ShellConfig::load(&path).unwrap();
        assert_eq!(config.start_page.as_deref(), Some("dashboard"));
        assert!(config.logging.stderr);
        assert_eq!(config.logging.default_filter, "info");
    }
}
