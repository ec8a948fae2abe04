//! Configuration module for the csef codec
//!
//! Provides types and parsing for `csef.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, load_config_file, merge_cli_overrides,
    parse_config, CliOverrides, ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
