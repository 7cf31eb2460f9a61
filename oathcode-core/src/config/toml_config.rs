//! TOML configuration file I/O
//!
//! Handles loading and saving the credential list to/from TOML files
//! in the user's configuration directory.

use crate::config::OathcodeConfig;
use crate::error::{ConfigError, OathcodeError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the default configuration directory
///
/// Returns ~/.config/oathcode, or OATHCODE_CONFIG_DIR if set
pub fn get_config_dir() -> Result<PathBuf, OathcodeError> {
    if let Ok(config_dir) = std::env::var("OATHCODE_CONFIG_DIR") {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME").map_err(|_| {
        OathcodeError::Config(ConfigError::IoError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join("oathcode"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, OathcodeError> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the default TOML file
pub fn load_config() -> Result<OathcodeConfig, OathcodeError> {
    let config_path = get_config_path()?;
    load_config_from_path(&config_path)
}

/// Load configuration from the default TOML file, or an empty one if missing
pub fn load_config_or_default() -> Result<OathcodeConfig, OathcodeError> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        debug!("No configuration at {:?}, starting empty", config_path);
        return Ok(OathcodeConfig::default());
    }
    load_config_from_path(&config_path)
}

/// Load configuration from a specific TOML file
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<OathcodeConfig, OathcodeError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => OathcodeError::Config(ConfigError::LoadFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        }),
        _ => OathcodeError::Config(ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        }),
    })?;

    let config: OathcodeConfig = toml::from_str(&contents).map_err(|e| {
        OathcodeError::Config(ConfigError::ValidationError {
            message: format!("Failed to parse config file: {}", e),
        })
    })?;

    config.validate().map_err(|e| {
        warn!("Configuration validation failed: {}", e);
        OathcodeError::Config(ConfigError::ValidationError { message: e })
    })?;

    debug!(
        "Loaded {} credential(s) from {:?}",
        config.credentials.len(),
        path.as_ref()
    );
    Ok(config)
}

/// Save configuration to the default TOML file
pub fn save_config(config: &OathcodeConfig) -> Result<(), OathcodeError> {
    let config_path = get_config_path()?;
    save_config_to_path(config, &config_path)
}

/// Save configuration to a specific TOML file
pub fn save_config_to_path<P: AsRef<Path>>(
    config: &OathcodeConfig,
    path: P,
) -> Result<(), OathcodeError> {
    config
        .validate()
        .map_err(|e| OathcodeError::Config(ConfigError::ValidationError { message: e }))?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            OathcodeError::Config(ConfigError::IoError {
                message: format!("Failed to create config directory: {}", e),
            })
        })?;
    }

    let toml_string = toml::to_string_pretty(config)?;

    std::fs::write(&path, toml_string).map_err(|_e| {
        OathcodeError::Config(ConfigError::SaveFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        })
    })?;

    info!("Saved configuration to {:?}", path.as_ref());
    Ok(())
}
