//! CSEF (Compact Sprite Encoding Format) - Library for compact pixel sprites
//!
//! CSEF stores an indexed-color sprite as one short printable string: runs
//! of up to nine cells, plus row-level shorthands for empty rows, repeated
//! rows and left/right symmetric rows. This library provides functionality to:
//! - Decode CSEF strings into grids, leniently or strictly
//! - Encode grids back into the shortest greedy CSEF form
//! - Mirror sprites and derive mirrored frames in a named set
//! - Resolve color codes through an alphabet and palette into RGBA pixels
//! - Read and write the editor's `width: N, encoded: '...'` snippets
//!
//! ```
//! use csef::codes::ColorCodes;
//! use csef::decoder::decode;
//! use csef::encoder::{encode, EncodeOptions};
//!
//! let grid = decode("1A1B>~", 4).unwrap();
//! assert_eq!(grid.to_string(), "ABBA\n....");
//!
//! let encoded = encode(&grid, &ColorCodes::default(), EncodeOptions::default()).unwrap();
//! assert_eq!(encoded.encoded, "1A1B>~");
//! ```

pub mod cli;
pub mod codes;
pub mod color;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod palette;
pub mod palettes;
pub mod snippet;
pub mod sprite_set;
pub mod tokenizer;
pub mod transforms;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use codes::ColorCodes;
pub use decoder::{decode, decode_strict, decode_with_warnings, DecodeMode, Decoder};
pub use encoder::{encode, encode_indices, EncodeOptions, Encoded};
pub use error::{CsefError, Warning};
pub use grid::{Cell, SpriteGrid};
pub use palette::{ColorTable, Palette};
pub use snippet::Snippet;
pub use sprite_set::SpriteSet;
pub use tokenizer::tokenize;
pub use transforms::mirror_horizontal;
