//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//!
//! ```toml
//! default_keyboard = "de"
//!
//! [loader]
//! keyboards_dir = "/usr/share/keyloom/keyboards"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use keyloom::config::LoaderConfig;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Settings read from the CLI configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Loader settings shared with the library.
    #[serde(default)]
    loader: LoaderConfig,

    /// Keyboard shown when `show` is given no id.
    #[serde(default = "default_keyboard")]
    default_keyboard: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            default_keyboard: default_keyboard(),
        }
    }
}

impl CliConfig {
    pub fn loader(&self) -> &LoaderConfig {
        &self.loader
    }

    pub fn default_keyboard(&self) -> &str {
        &self.default_keyboard
    }
}

fn default_keyboard() -> String {
    "us".to_string()
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (keyloom/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<CliConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("keyloom/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "keyloom", "keyloom") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(CliConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<CliConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_keyboard = \"de\"\n\n[loader]\nkeyboards_dir = \"/opt/layouts\"\n",
        )
        .expect("Failed to write config");

        let config = load_config(Some(&path)).expect("Config is valid");
        assert_eq!(config.default_keyboard(), "de");
        assert_eq!(config.loader().keyboards_dir(), Some("/opt/layouts"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").expect("Empty config is valid");
        assert_eq!(config.default_keyboard(), "us");
        assert_eq!(config.loader().keyboards_dir(), None);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::MissingFile(missing)) if missing == path
        ));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_keyboard = [").expect("Failed to write config");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
    }
}
