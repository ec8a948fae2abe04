//! Validate command implementation

use serde::Serialize;
use std::collections::BTreeSet;
use std::process::ExitCode;

use crate::decoder::DecodeMode;
use crate::grid::Cell;

use super::codec::decode_input;
use super::{print_json, read_input, Loaded, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    width: usize,
    height: usize,
    errors: Vec<String>,
}

/// Execute the validate command.
///
/// The input is decoded strictly for the first grammar error, then leniently
/// so every other skipped character is listed too. Codes outside the
/// configured palette are also reported.
pub fn run_validate(loaded: &Loaded, input: &str, json: bool) -> ExitCode {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read input: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut errors = Vec::new();
    if let Err(e) = decode_input(loaded, &text, DecodeMode::Strict, false) {
        errors.push(e.to_string());
    }

    let decoded = match decode_input(loaded, &text, DecodeMode::Lenient, false) {
        Ok(decoded) => decoded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // The strict error is normally also the first lenient warning
    for warning in decoded.warnings.iter().map(|w| format!("malformed token at {}", w)) {
        if !errors.contains(&warning) {
            errors.push(warning);
        }
    }

    let unknown: BTreeSet<char> = decoded
        .grid
        .rows()
        .iter()
        .flatten()
        .filter(|cell| loaded.table.resolve_strict(**cell).is_err())
        .filter_map(|cell| match cell {
            Cell::Color(c) => Some(*c),
            Cell::Transparent => None,
        })
        .collect();
    errors.extend(unknown.iter().map(|c| format!("unknown color code '{}'", c)));

    let report = ValidationReport {
        valid: errors.is_empty(),
        width: decoded.grid.width(),
        height: decoded.grid.height(),
        errors,
    };

    if json {
        let code = print_json(&report);
        return if report.valid { code } else { ExitCode::from(EXIT_ERROR) };
    }

    if report.valid {
        println!("valid: {}x{}", report.width, report.height);
        ExitCode::from(EXIT_SUCCESS)
    } else {
        for error in &report.errors {
            eprintln!("Error: {}", error);
        }
        eprintln!("{} problem(s) found", report.errors.len());
        ExitCode::from(EXIT_ERROR)
    }
}
