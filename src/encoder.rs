//! CSEF encoding
//!
//! Each row is written with the first encoding that applies:
//!
//! 1. `~` if every cell is transparent
//! 2. `^` if the row equals the previous row
//! 3. run-length left half plus `>` if the width is even and the row reads
//!    the same mirrored
//! 4. run-length encoding of the whole row
//!
//! Runs longer than nine cells are split into `9<c>` chunks followed by the
//! remainder. The choice is greedy and per row, so the same grid always
//! produces the same string.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::codes::{ColorCodes, TRANSPARENT};
use crate::error::CsefError;
use crate::grid::{Cell, SpriteGrid};
use crate::tokenizer::{to_csef, Token, MAX_RUN};

/// Encoder options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Encode only the tight bounding box of the non-transparent cells
    #[serde(default)]
    pub skip_empty_bounding_box: bool,
}

impl EncodeOptions {
    pub fn skip_empty() -> Self {
        Self {
            skip_empty_bounding_box: true,
        }
    }
}

/// An encoded sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoded {
    /// Width to decode `encoded` with
    pub width: usize,
    pub height: usize,
    pub encoded: String,
    /// Length of `encoded` in characters
    pub size: usize,
    /// Top-left corner of the encoded area within the source grid
    #[serde(default)]
    pub offset: (usize, usize),
}

impl Encoded {
    /// The result for a sprite with nothing to encode.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            encoded: String::new(),
            size: 0,
            offset: (0, 0),
        }
    }
}

/// How a single row was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEncoding {
    Empty,
    Repeat,
    Symmetric,
    Plain,
}

/// Encodes sprite grids against a color code alphabet.
///
/// # Examples
///
/// ```
/// use csef::codes::ColorCodes;
/// use csef::encoder::Encoder;
/// use csef::grid::SpriteGrid;
///
/// let codes = ColorCodes::default();
/// let grid = SpriteGrid::parse("ABBA\nABBA\n....").unwrap();
/// let encoded = Encoder::new(&codes).encode(&grid).unwrap();
/// assert_eq!(encoded.encoded, "1A1B>^~");
/// assert_eq!(encoded.size, 7);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    codes: &'a ColorCodes,
    options: EncodeOptions,
}

impl<'a> Encoder<'a> {
    pub fn new(codes: &'a ColorCodes) -> Self {
        Self {
            codes,
            options: EncodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Encode a grid.
    ///
    /// Rows shorter than the grid width are treated as padded with
    /// transparent cells.
    ///
    /// # Errors
    ///
    /// `UnknownColorCode` if a cell holds a character outside the alphabet.
    /// `InvalidWidth` if the grid has rows but zero width, since the result
    /// could never be decoded.
    pub fn encode(&self, grid: &SpriteGrid) -> Result<Encoded, CsefError> {
        if grid.width() == 0 && grid.height() > 0 {
            return Err(CsefError::InvalidWidth(0));
        }

        let (area, offset) = if self.options.skip_empty_bounding_box {
            match grid.bounding_box() {
                Some(bbox) => (grid.crop(bbox), (bbox.x, bbox.y)),
                None => return Ok(Encoded::empty()),
            }
        } else {
            (grid.normalized(), (0, 0))
        };

        let tokens = self.encode_tokens(&area)?;
        let encoded = to_csef(&tokens);
        let size = encoded.chars().count();

        debug!(
            "encoded {}x{} grid into {} tokens ({} chars)",
            area.width(),
            area.height(),
            tokens.len(),
            size
        );

        Ok(Encoded {
            width: area.width(),
            height: area.height(),
            encoded,
            size,
            offset,
        })
    }

    /// Encode a rectangular grid into tokens.
    fn encode_tokens(&self, grid: &SpriteGrid) -> Result<Vec<Token>, CsefError> {
        let width = grid.width();
        let mut tokens = Vec::new();
        let mut last_row: Option<Vec<char>> = None;

        for (index, cells) in grid.rows().iter().enumerate() {
            let row = self.row_codes(cells)?;
            let kind = classify_row(&row, last_row.as_deref(), width);
            debug!("row {}: {:?}", index, kind);

            match kind {
                RowEncoding::Empty => tokens.push(Token::EmptyRow),
                RowEncoding::Repeat => tokens.push(Token::RepeatRow),
                RowEncoding::Symmetric => {
                    push_runs(&mut tokens, &row[..width / 2]);
                    tokens.push(Token::Symmetry);
                }
                RowEncoding::Plain => push_runs(&mut tokens, &row),
            }

            last_row = Some(row);
        }

        Ok(tokens)
    }

    fn row_codes(&self, cells: &[Cell]) -> Result<Vec<char>, CsefError> {
        cells
            .iter()
            .map(|cell| match *cell {
                Cell::Transparent => Ok(TRANSPARENT),
                Cell::Color(c) if self.codes.contains(c) => Ok(c),
                Cell::Color(c) => Err(CsefError::UnknownColorCode(c)),
            })
            .collect()
    }
}

/// Encode a grid.
///
/// # Errors
///
/// `UnknownColorCode` if a cell holds a character outside the alphabet.
pub fn encode(
    grid: &SpriteGrid,
    codes: &ColorCodes,
    options: EncodeOptions,
) -> Result<Encoded, CsefError> {
    Encoder::new(codes).with_options(options).encode(grid)
}

/// Encode a palette-index grid, as drawn in an editor.
///
/// # Errors
///
/// `UnsupportedPaletteSize` if an index has no code in the alphabet.
pub fn encode_indices(
    width: usize,
    pixels: &[Vec<Option<usize>>],
    codes: &ColorCodes,
    options: EncodeOptions,
) -> Result<Encoded, CsefError> {
    let grid = SpriteGrid::from_indices(width, pixels, codes)?;
    encode(&grid, codes, options)
}

/// Pick the encoding for one row.
pub fn classify_row(row: &[char], last_row: Option<&[char]>, width: usize) -> RowEncoding {
    if row.iter().all(|&c| c == TRANSPARENT) {
        RowEncoding::Empty
    } else if last_row == Some(row) {
        RowEncoding::Repeat
    } else if is_mirror_symmetric(row, width) {
        RowEncoding::Symmetric
    } else {
        RowEncoding::Plain
    }
}

/// True when `width` is even and the right half is the left half reversed.
fn is_mirror_symmetric(row: &[char], width: usize) -> bool {
    if width == 0 || width % 2 != 0 || row.len() != width {
        return false;
    }
    let (left, right) = row.split_at(width / 2);
    left.iter().eq(right.iter().rev())
}

/// Append run tokens for `cells`, splitting runs longer than [`MAX_RUN`].
fn push_runs(tokens: &mut Vec<Token>, cells: &[char]) {
    let mut iter = cells.iter().copied().peekable();

    while let Some(code) = iter.next() {
        let mut length = 1;
        while iter.next_if_eq(&code).is_some() {
            length += 1;
        }

        while length > 0 {
            let chunk = length.min(MAX_RUN);
            tokens.push(Token::Run {
                count: chunk as u8,
                code,
            });
            length -= chunk;
        }
    }
}
