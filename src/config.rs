//! Locating and reading the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::Config;

/// Config filename inside the per-user config directory.
const CONFIG_FILENAME: &str = "config.json";

/// Returns the default config path.
///
/// On Linux: ~/.config/starterm/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("starterm")
        .join(CONFIG_FILENAME)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the default path is
/// read when present; otherwise built-in defaults apply.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => read(path),
        None => {
            let path = default_config_path();
            if path.is_file() {
                read(&path)
            } else {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}
