//! Environment file loading and saving.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while handling the environment file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine the platform configuration directory.
    #[error("Failed to determine configuration directory")]
    NoConfigDir,

    /// Failed to read the environment file.
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the environment file.
    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the environment file.
    #[error("Failed to parse '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize settings.
    #[error("Failed to serialize settings: {0}")]
    SerializeJson(#[from] serde_json::Error),
}

/// Broker API credentials and the current session token.
///
/// The TOTP secret is carried as an opaque string for the operator's
/// convenience (shown at login time); samvat never generates codes from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth client id.
    #[serde(default)]
    pub api_key: String,
    /// OAuth client secret.
    #[serde(default)]
    pub api_secret: String,
    /// Redirect URL registered with the broker app.
    #[serde(default = "default_redirect")]
    pub redirect_url: String,
    /// TOTP secret, kept for the operator's login convenience.
    #[serde(default)]
    pub totp_secret: String,
    /// Current bearer token; empty until the first `samvat auth`.
    #[serde(default)]
    pub access_token: String,
    /// Target option expiry, refreshed alongside the token.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

fn default_redirect() -> String {
    "http://localhost".to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            redirect_url: default_redirect(),
            totp_secret: String::new(),
            access_token: String::new(),
            expiry_date: None,
        }
    }
}

/// The operator-edited environment file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Upstox API credentials and session state.
    #[serde(default)]
    pub upstox: Credentials,
    /// Data directory override; the platform default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path`.
    ///
    /// A missing file is not an error: a blank skeleton is written for the
    /// operator to fill in, and returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or the skeleton cannot be written.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves settings to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFile {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns true if the API key and secret are both present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.upstox.api_key.is_empty() && !self.upstox.api_secret.is_empty()
    }

    /// Resolves the data directory: the explicit override, or the platform
    /// data dir.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if neither is available.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Path where the NSE instrument dump is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if no data directory resolves.
    pub fn nse_catalog_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join("NSE_main.json"))
    }

    /// Path where the Groww instrument dump is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if no data directory resolves.
    pub fn groww_catalog_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join("instrument.csv"))
    }

    /// Directory where option-leg artifacts are written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if no data directory resolves.
    pub fn historic_dir(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join("historic").join("data"))
    }
}

/// Returns the default environment file path in the platform config
/// directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if the platform provides no home
/// directory.
pub fn default_env_path() -> Result<PathBuf, ConfigError> {
    project_dirs().map(|dirs| dirs.config_dir().join("env.json"))
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "samvat").ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.json");

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert!(!settings.has_credentials());
        assert_eq!(settings.upstox.redirect_url, "http://localhost");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("env.json");

        let mut settings = Settings::default();
        settings.upstox.api_key = "key".to_string();
        settings.upstox.api_secret = "secret".to_string();
        settings.upstox.access_token = "token".to_string();
        settings.upstox.expiry_date = NaiveDate::from_ymd_opt(2025, 1, 30);
        settings.save(&path).unwrap();

        let reloaded = Settings::load(&path).unwrap();
        assert_eq!(reloaded, settings);
        assert!(reloaded.has_credentials());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.json");
        fs::write(&path, r#"{"upstox":{"api_key":"key"}}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.upstox.api_key, "key");
        assert!(settings.upstox.access_token.is_empty());
        assert!(settings.upstox.expiry_date.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.json");
        fs::write(&path, "{broken").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::ParseJson { .. })
        ));
    }

    #[test]
    fn test_data_dir_override() {
        let settings = Settings {
            data_dir: Some(PathBuf::from("/tmp/samvat-data")),
            ..Default::default()
        };

        assert_eq!(
            settings.nse_catalog_path().unwrap(),
            PathBuf::from("/tmp/samvat-data/NSE_main.json")
        );
        assert_eq!(
            settings.historic_dir().unwrap(),
            PathBuf::from("/tmp/samvat-data/historic/data")
        );
    }
}
