use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::provider::openweather::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Default location of the weather log, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "weather_log.json";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const LOG_FILE_ENV: &str = "WEATHER_LOG_FILE";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// log_file = "/home/me/weather_log.json"
/// timeout_secs = 10
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub log_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `OPENWEATHER_API_KEY` and `WEATHER_LOG_FILE` from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(std::env::var(API_KEY_ENV).ok(), std::env::var(LOG_FILE_ENV).ok())
    }

    /// Replace the API key and log file with non-empty override values.
    pub fn with_overrides(mut self, api_key: Option<String>, log_file: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(file) = log_file.filter(|f| !f.trim().is_empty()) {
            self.log_file = Some(PathBuf::from(file));
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the API key, or an error with a hint on how to set one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.log_file(), PathBuf::from("weather_log.json"));
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.base_url(), "https://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_overrides(Some("ENV_KEY".into()), Some("/tmp/log.json".into()));

        assert_eq!(cfg.api_key().unwrap(), "ENV_KEY");
        assert_eq!(cfg.log_file(), PathBuf::from("/tmp/log.json"));
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_overrides(Some("  ".into()), Some(String::new()));

        assert_eq!(cfg.api_key().unwrap(), "FILE_KEY");
        assert_eq!(cfg.log_file(), PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn parses_toml() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "abc"
            log_file = "logs/weather.json"
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key().unwrap(), "abc");
        assert_eq!(cfg.log_file(), PathBuf::from("logs/weather.json"));
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
    }
}
