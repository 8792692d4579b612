//! Optional `stories_config.ron` in the working directory.
//!
//! Every field may be omitted; missing fields take the defaults below.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stories_core::{SearchSettings, API_ENDPOINT, DEFAULT_TERM, SEARCH_KEY};
use stories_engine::FetchSettings;
use stories_logging::{LevelFilter, LogDestination};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "stories_config.ron";
const STATE_FILENAME: &str = ".stories_state.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint_prefix: String,
    pub storage_key: String,
    pub initial_term: String,
    pub state_file: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_target: LogTarget,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            endpoint_prefix: API_ENDPOINT.to_string(),
            storage_key: SEARCH_KEY.to_string(),
            initial_term: DEFAULT_TERM.to_string(),
            state_file: PathBuf::from(".").join(STATE_FILENAME),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_target: LogTarget::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            endpoint_prefix: self.endpoint_prefix.clone(),
            storage_key: self.storage_key.clone(),
            initial_term: self.initial_term.clone(),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_settings(), SearchSettings::default());
        assert_eq!(config.fetch_settings().max_bytes, FetchSettings::default().max_bytes);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(initial_term: "Rust", request_timeout_secs: 5, log_target: Both, log_level: "debug")"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.initial_term, "Rust");
        assert_eq!(config.endpoint_prefix, API_ENDPOINT);
        assert_eq!(config.fetch_settings().request_timeout, Duration::from_secs(5));
        assert_eq!(LogDestination::from(config.log_target), LogDestination::Both);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(initial_term: ").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
