use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const PORT_ENV: &str = "PORT";

const SNAPSHOT_FILE: &str = "weather-data.json";
const RECORDS_FILE: &str = "ontario-records.json";

/// OpenWeatherMap connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_openweather_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweather_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Ontario air quality (AQHI) feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqhiConfig {
    #[serde(default = "default_aqhi_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AqhiConfig {
    fn default() -> Self {
        Self { url: default_aqhi_url(), timeout_secs: default_timeout() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// data_dir = "data"
///
/// [openweather]
/// api_key = "..."
///
/// [server]
/// port = 3000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the fallback snapshot and other bundled JSON.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub openweather: OpenWeatherConfig,

    #[serde(default)]
    pub aqhi: AqhiConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            openweather: OpenWeatherConfig::default(),
            aqhi: AqhiConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

fn default_openweather_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_aqhi_url() -> String {
    "https://www.airqualityontario.com/aqhi/json/aqhi.json".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Config {
    /// Load config from the platform config dir, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-trek", "trek-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay `OPENWEATHER_API_KEY` and `PORT` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::apply_env`], reading variables through `lookup`.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.openweather.api_key = Some(key);
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {PORT_ENV} value: {port:?}"))?;
        }

        Ok(())
    }

    /// Set or replace the OpenWeatherMap API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }

    /// Returns the API key, treating a blank value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.openweather
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn is_api_key_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_point_at_bundled_data() {
        let cfg = Config::default();

        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.openweather.timeout_secs, 10);
        assert_eq!(cfg.snapshot_path(), PathBuf::from("data").join("weather-data.json"));
        assert_eq!(cfg.records_path(), PathBuf::from("data").join("ontario-records.json"));
        assert!(!cfg.is_api_key_configured());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();

        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);

        cfg.set_api_key("OPEN_KEY".into());
        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
        assert!(cfg.is_api_key_configured());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env_from(env(&[(API_KEY_ENV, "ENV_KEY"), (PORT_ENV, "8080")]))
            .expect("valid env");

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg.apply_env_from(env(&[(PORT_ENV, "not-a-port")])).unwrap_err();

        assert!(err.to_string().contains("Invalid PORT value"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");

        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.server.port = 4000;
        cfg.data_dir = PathBuf::from("/srv/trek");
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key(), Some("OPEN_KEY"));
        assert_eq!(loaded.server.port, 4000);
        assert_eq!(loaded.data_dir, PathBuf::from("/srv/trek"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[openweather]\napi_key = \"K\"\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.api_key(), Some("K"));
        assert_eq!(cfg.openweather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(cfg.aqhi.timeout_secs, 10);
    }
}
