//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod codec;
mod info;
mod validate;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, CsefConfig};
use crate::palette::ColorTable;

pub use info::PaletteAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// csef - Compact Sprite Encoding Format codec
#[derive(Parser)]
#[command(name = "csef")]
#[command(about = "CSEF - decode, encode and inspect Compact Sprite Encoding Format sprites")]
#[command(version)]
pub struct Cli {
    /// Path to a csef.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Built-in palette to use instead of the configured one
    #[arg(long, global = true)]
    pub palette: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a CSEF string into rows of color codes
    Decode {
        /// CSEF string, or '-' to read from stdin
        input: String,

        /// Sprite width in cells
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        width: Option<u64>,

        /// Fail on the first malformed token instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Read the input as an editor snippet (width: N, encoded: '...')
        #[arg(long)]
        snippet: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a grid of color codes read from stdin or a file
    Encode {
        /// Grid text file, one row per line (default: stdin)
        input: Option<PathBuf>,

        /// Grid width; shorter lines are padded with transparent cells
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        width: Option<u64>,

        /// Trim to the bounding box of non-transparent cells
        #[arg(long)]
        skip_empty: bool,

        /// Print the editor's commented export block
        #[arg(long, conflicts_with = "json")]
        comment: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mirror a sprite left to right
    Mirror {
        /// CSEF string, or '-' to read from stdin
        input: String,

        /// Sprite width in cells
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        width: Option<u64>,

        /// Print the mirrored sprite as a CSEF snippet
        #[arg(long)]
        encode: bool,
    },

    /// Check a CSEF string strictly and report every problem
    Validate {
        /// CSEF string, or '-' to read from stdin
        input: String,

        /// Sprite width in cells
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        width: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dimensions, token counts and size of a CSEF string
    Info {
        /// CSEF string, or '-' to read from stdin
        input: String,

        /// Sprite width in cells
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        width: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List and inspect built-in palettes
    Palettes {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config;

    // Flags map onto the matching csef.toml fields; unset flags keep the file's value
    let overrides = CliOverrides {
        palette: cli.palette,
        ..Default::default()
    };

    match cli.command {
        Commands::Decode {
            input,
            width,
            strict,
            snippet,
            json,
        } => {
            let overrides = CliOverrides {
                width: width_arg(width),
                strict: strict.then_some(true),
                ..overrides
            };
            with_config(&config_path, overrides, |loaded| {
                codec::run_decode(loaded, &input, snippet, json)
            })
        }
        Commands::Encode {
            input,
            width,
            skip_empty,
            comment,
            json,
        } => {
            let overrides = CliOverrides {
                skip_empty: skip_empty.then_some(true),
                ..overrides
            };
            with_config(&config_path, overrides, |loaded| {
                codec::run_encode(loaded, input.as_deref(), width_arg(width), comment, json)
            })
        }
        Commands::Mirror {
            input,
            width,
            encode,
        } => {
            let overrides = CliOverrides {
                width: width_arg(width),
                ..overrides
            };
            with_config(&config_path, overrides, |loaded| codec::run_mirror(loaded, &input, encode))
        }
        Commands::Validate { input, width, json } => {
            let overrides = CliOverrides {
                width: width_arg(width),
                ..overrides
            };
            with_config(&config_path, overrides, |loaded| {
                validate::run_validate(loaded, &input, json)
            })
        }
        Commands::Info { input, width, json } => {
            let overrides = CliOverrides {
                width: width_arg(width),
                ..overrides
            };
            with_config(&config_path, overrides, |loaded| info::run_info(loaded, &input, json))
        }
        Commands::Palettes { action } => info::run_palettes(action),
    }
}

/// Load the configuration, apply overrides, and hand it to a command.
fn with_config<F>(path: &Option<PathBuf>, overrides: CliOverrides, command: F) -> ExitCode
where
    F: FnOnce(&Loaded) -> ExitCode,
{
    let mut config = match load_config(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    merge_cli_overrides(&mut config, &overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let table = match config.build_table() {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    command(&Loaded {
        config,
        table,
        width_from_args: overrides.width.is_some(),
    })
}

/// Configuration and the color table built from it.
pub(crate) struct Loaded {
    pub config: CsefConfig,
    pub table: ColorTable,
    /// `--width` was given, so it beats a snippet's own width
    pub width_from_args: bool,
}

fn width_arg(width: Option<u64>) -> Option<usize> {
    width.map(|w| w as usize)
}

/// Read a positional input, where `-` means stdin.
///
/// Spaces are transparent cells, so only the line ending is stripped from
/// stdin and arguments are taken verbatim.
pub(crate) fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(strip_line_ending(&buf).to_string())
    } else {
        Ok(input.to_string())
    }
}

fn strip_line_ending(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n'])
}

/// Read a file, or stdin when no path is given.
pub(crate) fn read_file_or_stdin(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Print a JSON value to stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
