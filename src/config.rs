//! Configuration file loading and resolved settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::search::DEFAULT_ENGINE_URL;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default session file name, placed in the home directory.
pub const DEFAULT_SESSION_FILENAME: &str = ".serpage-session.json";

/// Configuration file structure. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Engine scheme and host; `{tld}` is replaced per query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_url: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Session cookie file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory containing the config file, if loaded from one.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration values over default settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref engine_url) = self.engine_url {
            settings.engine_url = engine_url.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = Duration::from_secs(timeout);
        }
        if let Some(ref session_file) = self.session_file {
            let base_dir = self
                .base_dir()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."));
            settings.session_file = self.resolve_path(session_file, &base_dir);
        }
    }
}

/// Resolved settings used at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub engine_url: String,
    pub user_agent: Option<String>,
    pub request_timeout: Duration,
    pub session_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            user_agent: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
            session_file: home.join(DEFAULT_SESSION_FILENAME),
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Look for `config.{ext}` in the user config directory.
fn find_default_config() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("serpage");
    ["toml", "yaml", "yml", "json"]
        .iter()
        .map(|ext| dir.join(format!("config.{}", ext)))
        .find(|path| path.exists())
}

/// Load settings from the config file (explicit or discovered) over defaults.
///
/// An unreadable or invalid config file is reported and ignored.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let path = options.config_path.or_else(find_default_config);

    let config = match path {
        Some(path) => match Config::load_from_path(&path).await {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{} ({}), using defaults", e, path.display());
                Config::default()
            }
        },
        None => Config::default(),
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    (settings, config)
}
