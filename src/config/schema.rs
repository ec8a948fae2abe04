//! Configuration schema types for `csef.toml`
//!
//! Every section is optional. An empty file is the game's setup: the
//! 77-code alphabet, the PC-66 palette, width 30 and lenient decoding.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codes::{ColorCodes, DEFAULT_ALPHABET};
use crate::decoder::{DecodeMode, Decoder};
use crate::encoder::EncodeOptions;
use crate::error::CsefError;
use crate::palette::{ColorTable, Palette};
use crate::palettes;
use crate::snippet::DEFAULT_SNIPPET_WIDTH;

/// Alphabet and palette section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Color codes in palette-index order
    pub alphabet: String,
    /// Name of a built-in palette
    pub palette: Option<String>,
    /// Inline palette as color strings
    pub colors: Option<Vec<String>>,
    /// Palette file with one AARRGGBB color per line
    pub palette_file: Option<PathBuf>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            palette: None,
            colors: None,
            palette_file: None,
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Fail on the first malformed token instead of skipping it
    pub strict: bool,
    /// Sprite width used when none is given on the command line
    pub width: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            strict: false,
            width: DEFAULT_SNIPPET_WIDTH,
        }
    }
}

impl DecodeConfig {
    pub fn mode(&self) -> DecodeMode {
        if self.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Trim to the bounding box of non-transparent cells
    pub skip_empty: bool,
}

/// Complete csef.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsefConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
    #[serde(default)]
    pub encode: EncodeConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "codec.alphabet")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "csef.toml: '{}' {}", self.field, self.message)
    }
}

impl ConfigValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl CsefConfig {
    /// Validate the configuration and return any errors.
    ///
    /// Palette files are not read here; their contents are checked when the
    /// table is built.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let codes = match ColorCodes::new(&self.codec.alphabet) {
            Ok(codes) if codes.is_empty() => {
                errors.push(ConfigValidationError::new("codec.alphabet", "must not be empty"));
                None
            }
            Ok(codes) => Some(codes),
            Err(e) => {
                errors.push(ConfigValidationError::new("codec.alphabet", e.to_string()));
                None
            }
        };

        let sources = [
            self.codec.palette.is_some(),
            self.codec.colors.is_some(),
            self.codec.palette_file.is_some(),
        ];
        if sources.iter().filter(|set| **set).count() > 1 {
            errors.push(ConfigValidationError::new(
                "codec",
                "set only one of 'palette', 'colors' or 'palette_file'",
            ));
        }

        if let Some(name) = &self.codec.palette {
            if palettes::get_builtin(name).is_none() {
                errors.push(ConfigValidationError::new(
                    "codec.palette",
                    format!(
                        "unknown palette '{}' (available: {})",
                        name,
                        palettes::list_builtins().join(", ")
                    ),
                ));
            }
        }

        if let Some(colors) = &self.codec.colors {
            match Palette::from_hex_list("inline", colors.as_slice()) {
                Ok(palette) => {
                    if let Some(codes) = &codes {
                        if palette.len() > codes.len() {
                            errors.push(ConfigValidationError::new(
                                "codec.colors",
                                format!(
                                    "{} colors but the alphabet has only {} codes",
                                    palette.len(),
                                    codes.len()
                                ),
                            ));
                        }
                    }
                }
                Err(e) => errors.push(ConfigValidationError::new("codec.colors", e.to_string())),
            }
        }

        if self.codec.colors.is_none() && self.codec.palette_file.is_none() {
            let name = self.codec.palette.as_deref().unwrap_or(palettes::DEFAULT_PALETTE);
            if let (Some(palette), Some(codes)) = (palettes::get_builtin(name), &codes) {
                if palette.len() > codes.len() {
                    errors.push(ConfigValidationError::new(
                        "codec.palette",
                        format!(
                            "palette '{}' has {} colors but the alphabet has only {} codes",
                            name,
                            palette.len(),
                            codes.len()
                        ),
                    ));
                }
            }
        }

        if self.decode.width == 0 {
            errors.push(ConfigValidationError::new(
                "decode.width",
                "must be a positive integer",
            ));
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The palette this configuration selects, loading a palette file if
    /// one is named.
    pub fn palette(&self) -> Result<Palette, super::ConfigError> {
        if let Some(colors) = &self.codec.colors {
            return Ok(Palette::from_hex_list("inline", colors.as_slice())?);
        }
        if let Some(path) = &self.codec.palette_file {
            let text = std::fs::read_to_string(path)?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string());
            return Ok(Palette::parse_palette_file(name, &text)?);
        }
        let name = self.codec.palette.as_deref().unwrap_or(palettes::DEFAULT_PALETTE);
        palettes::get_builtin(name).ok_or_else(|| {
            super::ConfigError::Validation(vec![format!("unknown palette '{}'", name)])
        })
    }

    /// Build the alphabet and palette lookup.
    pub fn build_table(&self) -> Result<ColorTable, super::ConfigError> {
        let codes = ColorCodes::new(&self.codec.alphabet)?;
        Ok(ColorTable::new(codes, self.palette()?)?)
    }

    /// A decoder for `width`, or the configured width if `None`.
    pub fn decoder(&self, width: Option<usize>) -> Result<Decoder, CsefError> {
        Ok(Decoder::new(width.unwrap_or(self.decode.width))?.with_mode(self.decode.mode()))
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            skip_empty_bounding_box: self.encode.skip_empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_the_game_setup() {
        let config: CsefConfig = toml::from_str("").unwrap();
        assert_eq!(config, CsefConfig::default());
        assert_eq!(config.decode.width, 30);
        assert_eq!(config.decode.mode(), DecodeMode::Lenient);
        assert!(config.is_valid());

        let table = config.build_table().unwrap();
        assert_eq!(table.palette().name(), "pc66");
        assert_eq!(table.codes().len(), 77);
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[codec]
alphabet = "ABCD"
colors = ["#000", "#FFFFFF", "0xFF0000"]

[decode]
strict = true
width = 16

[encode]
skip_empty = true
"##;
        let config: CsefConfig = toml::from_str(toml_str).unwrap();
        assert!(config.is_valid());
        assert_eq!(config.decode.mode(), DecodeMode::Strict);
        assert!(config.encode_options().skip_empty_bounding_box);

        let table = config.build_table().unwrap();
        assert_eq!(table.palette().len(), 3);
        assert_eq!(table.codes().len(), 4);

        let decoder = config.decoder(None).unwrap();
        assert_eq!(decoder.width(), 16);
        assert_eq!(config.decoder(Some(8)).unwrap().width(), 8);
    }

    #[test]
    fn test_builtin_palette_by_name() {
        let config: CsefConfig = toml::from_str("[codec]\npalette = \"pico8\"").unwrap();
        assert_eq!(config.build_table().unwrap().palette().len(), 16);
    }

    #[test]
    fn test_validate_unknown_palette() {
        let config: CsefConfig = toml::from_str("[codec]\npalette = \"vga\"").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "codec.palette");
    }

    #[test]
    fn test_validate_reserved_alphabet() {
        let config: CsefConfig = toml::from_str("[codec]\nalphabet = \"AB~\"").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "codec.alphabet");
    }

    #[test]
    fn test_validate_palette_larger_than_alphabet() {
        let toml_str = "[codec]\nalphabet = \"A\"\ncolors = [\"#000\", \"#FFF\"]";
        let config: CsefConfig = toml::from_str(toml_str).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "codec.colors");
    }

    #[test]
    fn test_validate_conflicting_palette_sources() {
        let toml_str = "[codec]\npalette = \"pc66\"\ncolors = [\"#000\"]";
        let config: CsefConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().iter().any(|e| e.field == "codec"));
    }

    #[test]
    fn test_validate_zero_width() {
        let config: CsefConfig = toml::from_str("[decode]\nwidth = 0").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "csef.toml: 'decode.width' must be a positive integer");
    }
}
