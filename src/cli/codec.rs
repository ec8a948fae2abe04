//! Decode, encode and mirror command implementations

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::decoder::{DecodeMode, Decoded};
use crate::encoder::{encode, EncodeOptions};
use crate::error::{CsefError, Warning};
use crate::grid::SpriteGrid;
use crate::snippet::Snippet;
use crate::transforms::mirror_horizontal;

use super::{print_json, read_file_or_stdin, read_input, Loaded, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Serialize)]
struct DecodeReport<'a> {
    #[serde(flatten)]
    grid: &'a SpriteGrid,
    warnings: &'a [Warning],
}

/// Decode `input` at the configured width.
///
/// With `snippet`, the input is read in the editor's snippet form and its
/// width wins over the config file, but not over `--width`.
pub(crate) fn decode_input(
    loaded: &Loaded,
    input: &str,
    mode: DecodeMode,
    snippet: bool,
) -> Result<Decoded, CsefError> {
    let configured = loaded.config.decode.width;
    let (width, code) = if snippet {
        let parsed = Snippet::parse_with_default(input, configured)?;
        let width = if loaded.width_from_args { configured } else { parsed.width };
        (width, parsed.encoded)
    } else {
        (configured, input.to_string())
    };

    let decoder = loaded.config.decoder(Some(width))?.with_mode(mode);
    decoder.decode(&code)
}

/// Print warnings to stderr, one per line.
pub(crate) fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Execute the decode command
pub fn run_decode(
    loaded: &Loaded,
    input: &str,
    snippet: bool,
    json: bool,
) -> ExitCode {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read input: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let decoded = match decode_input(loaded, &text, loaded.config.decode.mode(), snippet) {
        Ok(decoded) => decoded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        return print_json(&DecodeReport {
            grid: &decoded.grid,
            warnings: &decoded.warnings,
        });
    }

    report_warnings(&decoded.warnings);
    if !decoded.grid.is_empty() {
        println!("{}", decoded.grid);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the encode command
pub fn run_encode(
    loaded: &Loaded,
    input: Option<&Path>,
    width: Option<usize>,
    comment: bool,
    json: bool,
) -> ExitCode {
    let text = match read_file_or_stdin(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read input: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let grid = match width {
        Some(w) => SpriteGrid::parse_with_width(&text, w),
        None => SpriteGrid::parse(&text),
    };
    let grid = match grid {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let encoded = match encode(&grid, loaded.table.codes(), loaded.config.encode_options()) {
        Ok(encoded) => encoded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        print_json(&encoded)
    } else if comment {
        println!("{}", Snippet::export_comment(&encoded));
        ExitCode::from(EXIT_SUCCESS)
    } else {
        println!("{}", Snippet::from(&encoded));
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Execute the mirror command
pub fn run_mirror(loaded: &Loaded, input: &str, encode_result: bool) -> ExitCode {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read input: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let decoded = match decode_input(loaded, &text, loaded.config.decode.mode(), false) {
        Ok(decoded) => decoded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    report_warnings(&decoded.warnings);

    let mirrored = mirror_horizontal(&decoded.grid);
    if !encode_result {
        if !mirrored.is_empty() {
            println!("{}", mirrored);
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    // Keep the full frame so the result decodes at the original width
    match encode(&mirrored, loaded.table.codes(), EncodeOptions::default()) {
        Ok(encoded) => {
            println!("{}", Snippet::from(&encoded));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
