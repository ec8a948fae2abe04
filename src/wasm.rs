//! WASM API module for browser/JS interop
//!
//! Provides WebAssembly bindings for decoding, encoding and rendering CSEF
//! sprites in the editor and the game.

use wasm_bindgen::prelude::*;

use crate::codes::ColorCodes;
use crate::decoder::{DecodeMode, Decoder};
use crate::encoder::{encode, EncodeOptions, Encoded};
use crate::error::CsefError;
use crate::grid::SpriteGrid;
use crate::palette::ColorTable;
use crate::palettes;
use crate::transforms::mirror_horizontal;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Result of decoding a CSEF string.
#[wasm_bindgen]
pub struct DecodeResult {
    width: u32,
    height: u32,
    rows: Vec<String>,
    warnings: Vec<String>,
    error: Option<String>,
}

#[wasm_bindgen]
impl DecodeResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// One string per row, `.` for transparent cells
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> Vec<String> {
        self.rows.clone()
    }

    /// Characters skipped in lenient mode
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }

    /// Set when strict decoding failed or the width was invalid
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

impl DecodeResult {
    fn failed(width: u32, err: CsefError) -> Self {
        Self {
            width,
            height: 0,
            rows: Vec::new(),
            warnings: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// Result of encoding a grid.
#[wasm_bindgen]
pub struct EncodeResult {
    width: u32,
    height: u32,
    encoded: String,
    offset_x: u32,
    offset_y: u32,
    error: Option<String>,
}

#[wasm_bindgen]
impl EncodeResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn encoded(&self) -> String {
        self.encoded.clone()
    }

    /// Length of the encoded string in characters
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> u32 {
        self.encoded.chars().count() as u32
    }

    #[wasm_bindgen(getter, js_name = offsetX)]
    pub fn offset_x(&self) -> u32 {
        self.offset_x
    }

    #[wasm_bindgen(getter, js_name = offsetY)]
    pub fn offset_y(&self) -> u32 {
        self.offset_y
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

impl From<Result<Encoded, CsefError>> for EncodeResult {
    fn from(result: Result<Encoded, CsefError>) -> Self {
        match result {
            Ok(e) => Self {
                width: e.width as u32,
                height: e.height as u32,
                encoded: e.encoded,
                offset_x: e.offset.0 as u32,
                offset_y: e.offset.1 as u32,
                error: None,
            },
            Err(err) => Self {
                width: 0,
                height: 0,
                encoded: String::new(),
                offset_x: 0,
                offset_y: 0,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Result of rendering a sprite to RGBA pixels.
#[wasm_bindgen]
pub struct RenderResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    warnings: Vec<String>,
}

#[wasm_bindgen]
impl RenderResult {
    /// Width of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Any warnings generated while decoding or resolving colors
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }
}

fn decode_grid(code: &str, width: u32, strict: bool) -> Result<(SpriteGrid, Vec<String>), CsefError> {
    let mode = if strict { DecodeMode::Strict } else { DecodeMode::Lenient };
    let decoded = Decoder::new(width as usize)?.with_mode(mode).decode(code)?;
    let warnings = decoded.warnings.iter().map(ToString::to_string).collect();
    Ok((decoded.grid, warnings))
}

/// Decode a CSEF string at the given width.
#[wasm_bindgen]
pub fn decode_csef(code: &str, width: u32, strict: bool) -> DecodeResult {
    match decode_grid(code, width, strict) {
        Ok((grid, warnings)) => DecodeResult {
            width: grid.width() as u32,
            height: grid.height() as u32,
            rows: grid.to_string().lines().map(str::to_string).collect(),
            warnings,
            error: None,
        },
        Err(err) => DecodeResult::failed(width, err),
    }
}

/// Encode a grid given as newline-separated rows of color codes.
///
/// `width` of 0 takes the width from the longest row.
#[wasm_bindgen]
pub fn encode_csef(rows: &str, width: u32, skip_empty: bool) -> EncodeResult {
    let grid = if width == 0 {
        SpriteGrid::parse(rows)
    } else {
        SpriteGrid::parse_with_width(rows, width as usize)
    };
    let options = EncodeOptions {
        skip_empty_bounding_box: skip_empty,
    };
    grid.and_then(|grid| encode(&grid, &ColorCodes::default(), options))
        .into()
}

/// Mirror a CSEF sprite left to right and re-encode it at the same width.
#[wasm_bindgen]
pub fn mirror_csef(code: &str, width: u32) -> EncodeResult {
    decode_grid(code, width, false)
        .and_then(|(grid, _)| {
            encode(&mirror_horizontal(&grid), &ColorCodes::default(), EncodeOptions::default())
        })
        .into()
}

/// Decode a CSEF string and resolve it through a built-in palette.
///
/// An empty or unknown palette name falls back to PC-66 with a warning.
#[wasm_bindgen]
pub fn render_csef_rgba(code: &str, width: u32, palette: &str) -> RenderResult {
    let mut warnings = Vec::new();

    let table = match palettes::get_builtin(palette) {
        Some(p) => ColorTable::new(ColorCodes::default(), p),
        None => {
            if !palette.is_empty() {
                warnings.push(format!("unknown palette '{}', using pc66", palette));
            }
            Ok(ColorTable::default())
        }
    };

    let rendered = table.and_then(|table| {
        let (grid, decode_warnings) = decode_grid(code, width, false)?;
        Ok((table.to_rgba_image(&grid), decode_warnings))
    });

    match rendered {
        Ok(((image, render_warnings), decode_warnings)) => {
            warnings.extend(decode_warnings);
            warnings.extend(render_warnings.iter().map(ToString::to_string));
            RenderResult {
                width: image.width(),
                height: image.height(),
                pixels: image.into_raw(),
                warnings,
            }
        }
        Err(err) => {
            warnings.push(err.to_string());
            RenderResult {
                width: 0,
                height: 0,
                pixels: Vec::new(),
                warnings,
            }
        }
    }
}

/// Strictly validate a CSEF string.
///
/// # Returns
/// Array of problems (empty if valid)
#[wasm_bindgen]
pub fn validate_csef(code: &str, width: u32) -> Vec<String> {
    let mut problems = Vec::new();
    if let Err(err) = decode_grid(code, width, true) {
        problems.push(err.to_string());
    }
    if let Ok((_, warnings)) = decode_grid(code, width, false) {
        for warning in warnings {
            let message = format!("malformed token at {}", warning);
            if !problems.contains(&message) {
                problems.push(message);
            }
        }
    }
    problems
}
