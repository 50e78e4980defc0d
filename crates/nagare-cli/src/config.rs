//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use nagare::{NagareError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid canvas size {width} x {height}: both sides must be positive")]
    InvalidCanvas { width: f32, height: f32 },
}

impl From<ConfigError> for NagareError {
    fn from(err: ConfigError) -> Self {
        NagareError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (nagare/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, NagareError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("nagare/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "nagare", "nagare") {
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
    Ok(AppConfig::default())
}

/// Applies `--width`/`--height` on top of a loaded configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCanvas`] when the resulting canvas has a
/// side that is not positive.
pub fn with_canvas_overrides(
    mut config: AppConfig,
    width: Option<f32>,
    height: Option<f32>,
) -> Result<AppConfig, NagareError> {
    if let Some(width) = width {
        config = config.with_canvas_width(width);
    }
    if let Some(height) = height {
        config = config.with_canvas_height(height);
    }

    let (width, height) = (
        config.layout().canvas_width(),
        config.layout().canvas_height(),
    );
    if width <= 0.0 || height <= 0.0 {
        return Err(ConfigError::InvalidCanvas { width, height }.into());
    }
    Ok(config)
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, NagareError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(config:?; "Configuration loaded");
    Ok(config)
}
