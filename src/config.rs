//! Application-level configuration loading: fallback store location, scene file and
//! the time limits applied to the remote show store.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::show_store::StoreTimeouts;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SYNCPLAY_BACK_CONFIG_PATH";

const DEFAULT_SHOW_ID: &str = "detectivul_din_canapea";
/// Question served when no tier knows the active question of a show.
pub const DEFAULT_QUESTION_ID: &str = "q1";
const DEFAULT_LOCAL_STORE_PATH: &str = "data/active_questions.json";
const DEFAULT_SCENES_PATH: &str = "data/scenes.json";
const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(300);
const DEFAULT_REMOTE_READ_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_REMOTE_WRITE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_RECONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    default_show_id: String,
    default_question_id: String,
    local_store_path: PathBuf,
    scenes_path: PathBuf,
    catalog_ttl: Duration,
    remote_read_timeout: Duration,
    remote_write_timeout: Duration,
    catalog_timeout: Duration,
    connect_timeout: Duration,
    reconnect_timeout: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        local_store = %app_config.local_store_path.display(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Show served by `/api/quiz/current` when the caller does not name one.
    pub fn default_show_id(&self) -> &str {
        &self.default_show_id
    }

    /// Question identifier returned when neither storage tier has an entry.
    pub fn default_question_id(&self) -> &str {
        &self.default_question_id
    }

    /// JSON file mirroring the active question of every show.
    pub fn local_store_path(&self) -> &PathBuf {
        &self.local_store_path
    }

    /// JSON file holding the exclusive scenes.
    pub fn scenes_path(&self) -> &PathBuf {
        &self.scenes_path
    }

    /// How long a fetched catalog is served without asking the remote store again.
    pub fn catalog_ttl(&self) -> Duration {
        self.catalog_ttl
    }

    /// Upper bound for reading a show's status record.
    pub fn remote_read_timeout(&self) -> Duration {
        self.remote_read_timeout
    }

    /// Upper bound for writing a show's status record.
    pub fn remote_write_timeout(&self) -> Duration {
        self.remote_write_timeout
    }

    /// Upper bound for fetching a show's question catalog.
    pub fn catalog_timeout(&self) -> Duration {
        self.catalog_timeout
    }

    /// Upper bound for a driver to open a connection to the remote store.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Upper bound for one reconnect attempt made by the storage supervisor.
    pub fn reconnect_timeout(&self) -> Duration {
        self.reconnect_timeout
    }

    /// Limits handed to the store drivers.
    ///
    /// The request limit covers the slowest remote operation so the driver never cuts a
    /// call short before the caller's own bound fires.
    pub fn store_timeouts(&self) -> StoreTimeouts {
        StoreTimeouts {
            connect: self.connect_timeout,
            request: self
                .remote_read_timeout
                .max(self.remote_write_timeout)
                .max(self.catalog_timeout),
        }
    }

    /// Point the local fallback store at another file.
    pub fn with_local_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_store_path = path.into();
        self
    }

    /// Read scenes from another file.
    pub fn with_scenes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenes_path = path.into();
        self
    }

    /// Override every remote time limit at once.
    pub fn with_remote_timeouts(
        mut self,
        read: Duration,
        write: Duration,
        catalog: Duration,
    ) -> Self {
        self.remote_read_timeout = read;
        self.remote_write_timeout = write;
        self.catalog_timeout = catalog;
        self
    }

    /// Override the limit applied to each supervisor reconnect attempt.
    pub fn with_reconnect_timeout(mut self, limit: Duration) -> Self {
        self.reconnect_timeout = limit;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
///
/// Every field is optional; missing ones keep their built-in value.
struct RawConfig {
    default_show_id: Option<String>,
    default_question_id: Option<String>,
    local_store_path: Option<PathBuf>,
    scenes_path: Option<PathBuf>,
    catalog_ttl_secs: Option<u64>,
    remote_read_timeout_ms: Option<u64>,
    remote_write_timeout_ms: Option<u64>,
    catalog_timeout_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
    reconnect_timeout_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            default_show_id: value
                .default_show_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SHOW_ID.to_owned()),
            default_question_id: value
                .default_question_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_QUESTION_ID.to_owned()),
            local_store_path: value
                .local_store_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_STORE_PATH)),
            scenes_path: value
                .scenes_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENES_PATH)),
            catalog_ttl: value
                .catalog_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CATALOG_TTL),
            remote_read_timeout: value
                .remote_read_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_REMOTE_READ_TIMEOUT),
            remote_write_timeout: value
                .remote_write_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_REMOTE_WRITE_TIMEOUT),
            catalog_timeout: value
                .catalog_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CATALOG_TIMEOUT),
            connect_timeout: value
                .connect_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            reconnect_timeout: value
                .reconnect_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_RECONNECT_TIMEOUT),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = AppConfig::default();
        assert_eq!(config.default_question_id(), "q1");
        assert_eq!(config.catalog_ttl(), Duration::from_secs(300));
        assert_eq!(config.remote_read_timeout(), Duration::from_secs(2));
        assert_eq!(config.remote_write_timeout(), Duration::from_secs(5));
        assert_eq!(config.catalog_timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.reconnect_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn store_timeouts_follow_configured_limits() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"connect_timeout_ms": 1500, "remote_read_timeout_ms": 800, "catalog_timeout_ms": 9000}"#,
        )
        .unwrap();
        let timeouts = AppConfig::from(raw).store_timeouts();

        assert_eq!(timeouts.connect, Duration::from_millis(1_500));
        assert_eq!(timeouts.request, Duration::from_secs(9));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"local_store_path": "/tmp/active.json", "remote_read_timeout_ms": 750}"#,
        )
        .unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.local_store_path(), &PathBuf::from("/tmp/active.json"));
        assert_eq!(config.remote_read_timeout(), Duration::from_millis(750));
        assert_eq!(config.remote_write_timeout(), Duration::from_secs(5));
        assert_eq!(config.default_show_id(), "detectivul_din_canapea");
    }

    #[test]
    fn blank_identifiers_fall_back_to_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"default_question_id": "  ", "default_show_id": ""}"#)
                .unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.default_question_id(), DEFAULT_QUESTION_ID);
        assert_eq!(config.default_show_id(), DEFAULT_SHOW_ID);
    }
}
