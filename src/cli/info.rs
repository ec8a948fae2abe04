//! Info command implementations (info, palettes)

use clap::Subcommand;
use serde::Serialize;
use std::process::ExitCode;

use crate::codes::ColorCodes;
use crate::color::to_hex;
use crate::grid::BoundingBox;
use crate::palettes;
use crate::tokenizer::TokenStats;

use super::codec::{decode_input, report_warnings};
use super::{print_json, read_input, Loaded, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum PaletteAction {
    /// List all available built-in palettes
    List,
    /// Show the colors of a built-in palette with their codes
    Show {
        /// Name of the palette to show
        name: String,
    },
}

#[derive(Serialize)]
struct InfoReport {
    width: usize,
    height: usize,
    size: usize,
    cells: usize,
    filled: usize,
    bounding_box: Option<BoundingBox>,
    tokens: TokenStats,
}

/// Execute the info command
pub fn run_info(loaded: &Loaded, input: &str, json: bool) -> ExitCode {
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

    let grid = &decoded.grid;
    let report = InfoReport {
        width: grid.width(),
        height: grid.height(),
        size: text.chars().count(),
        cells: grid.width() * grid.height(),
        filled: grid.filled_count(),
        bounding_box: grid.bounding_box(),
        tokens: TokenStats::of(&text),
    };

    if json {
        return print_json(&report);
    }

    report_warnings(&decoded.warnings);
    println!("Size:       {}x{}", report.width, report.height);
    println!("Encoded:    {} characters for {} cells", report.size, report.cells);
    if report.size > 0 {
        println!("Ratio:      {:.2} cells per character", report.cells as f64 / report.size as f64);
    }
    println!("Filled:     {}", report.filled);
    match report.bounding_box {
        Some(b) => println!("Bounds:     {}x{} at ({}, {})", b.width, b.height, b.x, b.y),
        None => println!("Bounds:     (empty)"),
    }
    let t = report.tokens;
    println!(
        "Tokens:     {} runs, {} empty rows, {} repeats, {} mirrored rows",
        t.runs, t.empty_rows, t.repeat_rows, t.symmetry
    );
    if t.skipped > 0 {
        println!("Skipped:    {}", t.skipped);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the palettes command
pub fn run_palettes(action: PaletteAction) -> ExitCode {
    match action {
        PaletteAction::List => {
            println!("Available built-in palettes:");
            for name in palettes::list_builtins() {
                let len = palettes::get_builtin(name).map_or(0, |p| p.len());
                let marker = if name == palettes::DEFAULT_PALETTE { " (default)" } else { "" };
                println!("  {:<8} {} colors{}", name, len, marker);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PaletteAction::Show { name } => {
            let Some(palette) = palettes::get_builtin(&name) else {
                eprintln!("Error: Unknown palette '{}'", name);
                eprintln!("Available palettes: {}", palettes::list_builtins().join(", "));
                return ExitCode::from(EXIT_ERROR);
            };

            let codes = ColorCodes::default();
            println!("Palette: {}", palette.name());
            for (index, color) in palette.colors().iter().enumerate() {
                let code = codes.code_of(index).unwrap_or('?');
                println!("  {:>2}  {}  {}", index, code, to_hex(*color));
            }
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}
