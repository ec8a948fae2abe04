//! Configuration loading and discovery for `csef.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::CsefConfig;
use crate::error::CsefError;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked for on disk.
pub const CONFIG_FILE_NAME: &str = "csef.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse csef.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
    /// Alphabet or palette rejected when building the color table
    #[error("Invalid codec setup: {0}")]
    Codec(#[from] CsefError),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override decode width
    pub width: Option<usize>,
    /// Override strict decoding
    pub strict: Option<bool>,
    /// Override bounding-box trimming
    pub skip_empty: Option<bool>,
    /// Override the built-in palette
    pub palette: Option<String>,
}

/// Find csef.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find csef.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a csef.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. If no config file is found, returns the
/// default configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("sprites/csef.toml")))?;
/// let table = config.build_table()?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<CsefConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(CsefConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// A relative `palette_file` is resolved against the config file's
/// directory.
pub fn load_config_file(path: &Path) -> Result<CsefConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config = parse_config(&contents)?;

    if let Some(file) = config.codec.palette_file.take() {
        config.codec.palette_file = Some(match path.parent() {
            Some(root) => resolve_path(root, &file),
            None => file,
        });
    }

    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<CsefConfig, ConfigError> {
    let config: CsefConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. A palette
/// override replaces any palette source the file named.
pub fn merge_cli_overrides(config: &mut CsefConfig, overrides: &CliOverrides) {
    if let Some(width) = overrides.width {
        config.decode.width = width;
    }

    if let Some(strict) = overrides.strict {
        config.decode.strict = strict;
    }

    if let Some(skip_empty) = overrides.skip_empty {
        config.encode.skip_empty = skip_empty;
    }

    if let Some(ref palette) = overrides.palette {
        config.codec.palette = Some(palette.clone());
        config.codec.colors = None;
        config.codec.palette_file = None;
    }
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
