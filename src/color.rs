//! Color parsing utilities for palette entries
//!
//! Supports the following formats:
//! - Hex: `#RGB`, `#RRGGBB`
//! - Prefixed integer literal: `0xRRGGBB`
//! - Palette file entries: `AARRGGBB` (alpha is ignored, palettes are opaque)

use image::Rgb;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length for the detected format
    #[error("invalid color length {0}, expected 3 or 6 hex digits, or 8 for AARRGGBB")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a palette color string into an RGB color.
///
/// # Supported Formats
///
/// - `#RGB` - 3-digit hex, each digit is doubled (e.g., `#F00` -> red)
/// - `#RRGGBB` - 6-digit hex
/// - `0xRRGGBB` - the integer literal form sprite palettes are usually written in
/// - `AARRGGBB` - 8 bare hex digits as found in exported palette files
///
/// # Examples
///
/// ```
/// use csef::color::parse_color;
///
/// let red = parse_color("#F00").unwrap();
/// assert_eq!(red, image::Rgb([255, 0, 0]));
///
/// let sky = parse_color("0xa9fbee").unwrap();
/// assert_eq!(sky, image::Rgb([0xa9, 0xfb, 0xee]));
///
/// let from_file = parse_color("FF24222A").unwrap();
/// assert_eq!(from_file, image::Rgb([0x24, 0x22, 0x2a]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, has the wrong length, or holds
/// non-hex characters.
pub fn parse_color(s: &str) -> Result<Rgb<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return match hex.len() {
            3 | 6 => parse_hex_digits(hex),
            len => Err(ColorError::InvalidLength(len)),
        };
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return match hex.len() {
            6 => parse_hex_digits(hex),
            len => Err(ColorError::InvalidLength(len)),
        };
    }

    match s.len() {
        // AARRGGBB, drop the alpha pair
        8 => {
            validate_hex(s)?;
            parse_hex_digits(&s[2..])
        }
        6 => parse_hex_digits(s),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Build an RGB color from a packed `0xRRGGBB` integer.
pub fn rgb_from_u32(value: u32) -> Rgb<u8> {
    Rgb([
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ])
}

/// Format a color as `#RRGGBB`.
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

fn validate_hex(hex: &str) -> Result<(), ColorError> {
    match hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        Some(c) => Err(ColorError::InvalidHex(c)),
        None => Ok(()),
    }
}

/// Parse 3 or 6 hex digits (no prefix) into RGB
fn parse_hex_digits(hex: &str) -> Result<Rgb<u8>, ColorError> {
    validate_hex(hex)?;

    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (channel, c) in channels.iter_mut().zip(hex.chars()) {
                *channel = parse_hex_digit(c)? * 17;
            }
            Ok(Rgb(channels))
        }
        6 => {
            let r = parse_hex_pair(&hex[0..2])?;
            let g = parse_hex_pair(&hex[2..4])?;
            let b = parse_hex_pair(&hex[4..6])?;
            Ok(Rgb([r, g, b]))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut value = 0u8;
    for c in s.chars() {
        value = value * 16 + parse_hex_digit(c)?;
    }
    Ok(value)
}
