//! CSEF decoding
//!
//! Turns a CSEF string and a caller-supplied width into a [`SpriteGrid`].
//!
//! Supports both lenient and strict error modes:
//! - Lenient (default): structurally illegal characters are skipped, a
//!   [`Warning`] is recorded, and decoding continues with the next character.
//! - Strict: the first illegal character fails the decode with
//!   [`CsefError::MalformedToken`].

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::codes::{is_reserved, is_transparent};
use crate::error::{CsefError, Warning};
use crate::grid::{Cell, SpriteGrid};
use crate::tokenizer::{Spanned, Token, Tokens};

/// How the decoder treats malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Skip illegal characters and record warnings
    #[default]
    Lenient,
    /// Fail on the first illegal character
    Strict,
}

/// Result of a decode: the grid plus anything skipped along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub grid: SpriteGrid,
    pub warnings: Vec<Warning>,
}

/// A decoder for one sprite width.
///
/// # Examples
///
/// ```
/// use csef::decoder::{DecodeMode, Decoder};
///
/// let decoder = Decoder::new(4).unwrap();
/// let decoded = decoder.decode("1A1B>~").unwrap();
/// assert_eq!(decoded.grid.to_string(), "ABBA\n....");
/// assert!(decoded.warnings.is_empty());
///
/// let strict = Decoder::new(3).unwrap().with_mode(DecodeMode::Strict);
/// assert!(strict.decode("1A>").is_err()); // '>' needs an even width
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    width: usize,
    mode: DecodeMode,
}

impl Decoder {
    /// Create a lenient decoder.
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if `width` is zero.
    pub fn new(width: usize) -> Result<Self, CsefError> {
        if width == 0 {
            return Err(CsefError::InvalidWidth(width));
        }
        Ok(Self {
            width,
            mode: DecodeMode::Lenient,
        })
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Decode a CSEF string.
    ///
    /// # Errors
    ///
    /// In strict mode, `MalformedToken` for the first illegal character.
    /// Lenient decoding never fails.
    pub fn decode(&self, input: &str) -> Result<Decoded, CsefError> {
        let mut rows = RowAssembler::new(self.width);
        let mut warnings = Vec::new();

        for item in Tokens::new(input) {
            let outcome = item.and_then(|spanned| {
                trace!("token {} at {}", spanned.token, spanned.position);
                self.apply(&mut rows, spanned)
            });

            if let Err(err) = outcome {
                match self.mode {
                    DecodeMode::Strict => return Err(err),
                    DecodeMode::Lenient => {
                        let warning = Warning::from(err);
                        debug!("skipping input: {}", warning);
                        warnings.push(warning);
                    }
                }
            }
        }

        let grid = rows.finish();
        debug!(
            "decoded {} chars into {}x{} grid ({} warnings)",
            input.chars().count(),
            grid.width(),
            grid.height(),
            warnings.len()
        );
        Ok(Decoded { grid, warnings })
    }

    fn apply(&self, rows: &mut RowAssembler, spanned: Spanned) -> Result<(), CsefError> {
        let Spanned { position, token } = spanned;

        match token {
            Token::EmptyRow => {
                if !rows.at_boundary() {
                    return Err(CsefError::malformed(
                        position,
                        "'~' is only valid at a row boundary",
                    ));
                }
                rows.push_empty_row();
            }
            Token::RepeatRow => {
                if !rows.at_boundary() {
                    return Err(CsefError::malformed(
                        position,
                        "'^' is only valid at a row boundary",
                    ));
                }
                if !rows.repeat_last_row() {
                    return Err(CsefError::malformed(
                        position,
                        "'^' has no previous row to repeat",
                    ));
                }
            }
            Token::Symmetry => {
                if self.width % 2 != 0 {
                    return Err(CsefError::malformed(
                        position,
                        format!("'>' requires an even width, got {}", self.width),
                    ));
                }
                if !rows.complete_symmetric() {
                    return Err(CsefError::malformed(
                        position,
                        format!(
                            "'>' requires {} pending cells, found {}",
                            self.width / 2,
                            rows.pending_len()
                        ),
                    ));
                }
            }
            Token::Run { count, code } => {
                if self.mode == DecodeMode::Strict && is_reserved(code) && !is_transparent(code) {
                    return Err(CsefError::malformed(
                        position + 1,
                        format!("'{}' is reserved and cannot be a color code", code),
                    ));
                }
                rows.push_run(count as usize, Cell::from_char(code));
            }
        }

        Ok(())
    }
}

/// Decode a CSEF string in lenient mode.
///
/// # Examples
///
/// ```
/// use csef::decoder::decode;
///
/// let grid = decode("9A2A", 11).unwrap();
/// assert_eq!(grid.to_string(), "AAAAAAAAAAA");
/// ```
///
/// # Errors
///
/// `InvalidWidth` if `width` is zero.
pub fn decode(input: &str, width: usize) -> Result<SpriteGrid, CsefError> {
    Ok(Decoder::new(width)?.decode(input)?.grid)
}

/// Decode a CSEF string in strict mode.
///
/// # Errors
///
/// `InvalidWidth` if `width` is zero, `MalformedToken` for the first illegal
/// character.
pub fn decode_strict(input: &str, width: usize) -> Result<SpriteGrid, CsefError> {
    Ok(Decoder::new(width)?
        .with_mode(DecodeMode::Strict)
        .decode(input)?
        .grid)
}

/// Decode in lenient mode and return the warnings for skipped input.
///
/// # Errors
///
/// `InvalidWidth` if `width` is zero.
pub fn decode_with_warnings(
    input: &str,
    width: usize,
) -> Result<(SpriteGrid, Vec<Warning>), CsefError> {
    let decoded = Decoder::new(width)?.decode(input)?;
    Ok((decoded.grid, decoded.warnings))
}

/// Completed rows plus the cells of the row under construction.
struct RowAssembler {
    width: usize,
    rows: Vec<Vec<Cell>>,
    pending: Vec<Cell>,
}

impl RowAssembler {
    fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
            pending: Vec::with_capacity(width),
        }
    }

    fn at_boundary(&self) -> bool {
        self.pending.is_empty()
    }

    fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn push_empty_row(&mut self) {
        self.rows.push(vec![Cell::Transparent; self.width]);
    }

    /// Returns false when there is no row to repeat.
    fn repeat_last_row(&mut self) -> bool {
        match self.rows.last() {
            Some(last) => {
                let copy = last.clone();
                self.rows.push(copy);
                true
            }
            None => false,
        }
    }

    /// Returns false when fewer than `width / 2` cells are pending.
    fn complete_symmetric(&mut self) -> bool {
        let half = self.width / 2;
        if self.pending.len() < half {
            return false;
        }
        let mut row: Vec<Cell> = self.pending.drain(..).take(half).collect();
        row.extend(row.clone().into_iter().rev());
        self.rows.push(row);
        true
    }

    fn push_run(&mut self, count: usize, cell: Cell) {
        self.pending.extend(std::iter::repeat(cell).take(count));
        while self.pending.len() >= self.width {
            let row: Vec<Cell> = self.pending.drain(..self.width).collect();
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> SpriteGrid {
        if !self.pending.is_empty() {
            self.rows.push(std::mem::take(&mut self.pending));
        }
        SpriteGrid::from_rows(self.width, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(input: &str, width: usize) -> String {
        decode(input, width).unwrap().to_string()
    }

    #[test]
    fn test_zero_width_is_invalid() {
        assert_eq!(decode("1A", 0), Err(CsefError::InvalidWidth(0)));
        assert_eq!(decode_strict("1A", 0), Err(CsefError::InvalidWidth(0)));
    }

    #[test]
    fn test_empty_input_gives_empty_grid() {
        let grid = decode("", 5).unwrap();
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.width(), 5);
    }

    #[test]
    fn test_empty_row_token() {
        for width in 1..=12 {
            let grid = decode("~", width).unwrap();
            assert_eq!(grid, SpriteGrid::transparent(width, 1));
        }
    }

    #[test]
    fn test_repeat_row_token() {
        assert_eq!(text("1A1A^", 2), "AA\nAA");
        assert_eq!(text("1A1A~^", 2), "AA\n..\n..");
    }

    #[test]
    fn test_repeat_without_previous_row_is_noop() {
        let (grid, warnings) = decode_with_warnings("^", 3).unwrap();
        assert_eq!(grid.height(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(text("^3B", 3), "BBB");
    }

    #[test]
    fn test_symmetry_token() {
        assert_eq!(text("1A1B>", 4), "ABBA");
        assert_eq!(text("3.2A1B>", 12), "...AABBAA...");
    }

    #[test]
    fn test_symmetry_uses_first_half_of_overfilled_pending() {
        // Three pending cells at width 4: the third is dropped
        assert_eq!(text("1A1B1C>", 4), "ABBA");
    }

    #[test]
    fn test_symmetry_skipped_for_odd_width() {
        let (grid, warnings) = decode_with_warnings("1A1B>1C", 3).unwrap();
        assert_eq!(grid.to_string(), "ABC");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].position, 4);
    }

    #[test]
    fn test_symmetry_skipped_with_too_few_cells() {
        let (grid, warnings) = decode_with_warnings("1A>1B2C", 4).unwrap();
        assert_eq!(grid.to_string(), "ABCC");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_run_spanning_rows() {
        assert_eq!(text("9A", 4), "AAAA\nAAAA\nA");
        assert_eq!(text("9A2A", 11), "AAAAAAAAAAA");
        assert_eq!(text("6B", 3), "BBB\nBBB");
    }

    #[test]
    fn test_trailing_partial_row_is_kept() {
        let grid = decode("3A2B", 4).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.row(1).unwrap().len(), 1);
        assert!(!grid.is_rectangular());
    }

    #[test]
    fn test_structural_tokens_mid_row_are_skipped() {
        let (grid, warnings) = decode_with_warnings("1A~^1B", 2).unwrap();
        assert_eq!(grid.to_string(), "AB");
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].position, 2);
        assert_eq!(warnings[1].position, 3);
    }

    #[test]
    fn test_bad_run_lengths_do_not_desync_rows() {
        let (grid, warnings) = decode_with_warnings("2A0x2B2C", 2).unwrap();
        assert_eq!(grid.to_string(), "AA\nBB\nCC");
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_dangling_run_at_end() {
        let (grid, warnings) = decode_with_warnings("2A5", 2).unwrap();
        assert_eq!(grid.to_string(), "AA");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_transparent_run_codes() {
        assert_eq!(text("2.1A1 ", 4), "..A.");
    }

    #[test]
    fn test_lenient_accepts_reserved_run_code() {
        assert_eq!(text("2~", 2), "~~");
    }

    #[test]
    fn test_strict_rejects_mid_row_structural_token() {
        let err = decode_strict("1A~1B", 2).unwrap_err();
        assert!(matches!(err, CsefError::MalformedToken { position: 2, .. }));
    }

    #[test]
    fn test_strict_rejects_orphan_repeat() {
        let err = decode_strict("^1A", 1).unwrap_err();
        assert!(matches!(err, CsefError::MalformedToken { position: 0, .. }));
    }

    #[test]
    fn test_strict_rejects_symmetry_misuse() {
        assert!(decode_strict("1A1B>", 3).is_err());
        assert!(decode_strict("1A>", 4).is_err());
    }

    #[test]
    fn test_strict_rejects_bad_run() {
        assert!(matches!(
            decode_strict("0A", 1),
            Err(CsefError::MalformedToken { position: 0, .. })
        ));
        assert!(matches!(
            decode_strict("1A2", 1),
            Err(CsefError::MalformedToken { position: 2, .. })
        ));
    }

    #[test]
    fn test_strict_rejects_reserved_run_code() {
        assert!(matches!(
            decode_strict("1~", 1),
            Err(CsefError::MalformedToken { position: 1, .. })
        ));
        assert!(decode_strict("13", 1).is_err());
    }

    #[test]
    fn test_strict_accepts_well_formed_input() {
        let grid = decode_strict("~1A1B>^2.1C1.", 4).unwrap();
        assert_eq!(grid.to_string(), "....\nABBA\nABBA\n..C.");
    }

    #[test]
    fn test_decoder_accessors() {
        let decoder = Decoder::new(8).unwrap().with_mode(DecodeMode::Strict);
        assert_eq!(decoder.width(), 8);
        assert_eq!(decoder.mode(), DecodeMode::Strict);
        assert_eq!(DecodeMode::default(), DecodeMode::Lenient);
    }
}
