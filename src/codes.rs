//! Color code alphabet
//!
//! Maps palette indices to single printable characters and back. The two
//! transparent markers `.` and ` ` never belong to the alphabet, and neither do
//! the grammar characters (`~`, `^`, `>` and the digits).

use std::collections::HashMap;

use crate::error::CsefError;

/// Canonical transparent marker, used by the encoder for empty cells.
pub const TRANSPARENT: char = '.';

/// Legacy transparent marker accepted on input.
pub const TRANSPARENT_LEGACY: char = ' ';

/// Both characters that decode to "no pixel".
pub const TRANSPARENT_MARKERS: [char; 2] = [TRANSPARENT, TRANSPARENT_LEGACY];

/// Structural tokens of the grammar.
pub const EMPTY_ROW: char = '~';
pub const REPEAT_ROW: char = '^';
pub const SYMMETRY: char = '>';

/// Default alphabet. Index `i` of the game palette is written as the `i`-th
/// character here.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%&*()_+-=[]{};:,/<?`\"";

/// Returns true if `c` decodes to "no pixel".
pub fn is_transparent(c: char) -> bool {
    TRANSPARENT_MARKERS.contains(&c)
}

/// Returns true if `c` carries meaning in the grammar and cannot be a color.
pub fn is_reserved(c: char) -> bool {
    is_transparent(c) || c.is_ascii_digit() || matches!(c, EMPTY_ROW | REPEAT_ROW | SYMMETRY)
}

/// An immutable alphabet of color codes.
///
/// Built once and shared by reference with every decode and encode call.
///
/// # Examples
///
/// ```
/// use csef::codes::ColorCodes;
///
/// let codes = ColorCodes::new("ABC").unwrap();
/// assert_eq!(codes.code_of(1).unwrap(), 'B');
/// assert_eq!(codes.index_of('C').unwrap(), Some(2));
/// assert_eq!(codes.index_of('.').unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCodes {
    chars: Vec<char>,
    indices: HashMap<char, usize>,
}

impl ColorCodes {
    /// Build an alphabet from its characters, in palette order.
    ///
    /// # Errors
    ///
    /// `ReservedCode` if a character is a transparent marker, digit or grammar
    /// token; `DuplicateCode` if a character appears twice.
    pub fn new(alphabet: &str) -> Result<Self, CsefError> {
        let mut chars = Vec::new();
        let mut indices = HashMap::new();

        for c in alphabet.chars() {
            if is_reserved(c) || c.is_control() {
                return Err(CsefError::ReservedCode(c));
            }
            if indices.insert(c, chars.len()).is_some() {
                return Err(CsefError::DuplicateCode(c));
            }
            chars.push(c);
        }

        Ok(Self { chars, indices })
    }

    /// Number of codes available.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the code assigned to a palette index.
    ///
    /// # Errors
    ///
    /// `UnsupportedPaletteSize` if the index is past the end of the alphabet.
    pub fn code_of(&self, index: usize) -> Result<char, CsefError> {
        self.chars
            .get(index)
            .copied()
            .ok_or(CsefError::UnsupportedPaletteSize {
                index,
                alphabet: self.chars.len(),
            })
    }

    /// Returns the palette index of a code, or `None` for a transparent marker.
    ///
    /// # Errors
    ///
    /// `UnknownColorCode` for any other character outside the alphabet.
    pub fn index_of(&self, code: char) -> Result<Option<usize>, CsefError> {
        if is_transparent(code) {
            return Ok(None);
        }
        self.indices
            .get(&code)
            .copied()
            .map(Some)
            .ok_or(CsefError::UnknownColorCode(code))
    }

    /// Like [`index_of`](Self::index_of), but unknown codes are treated as
    /// transparent.
    pub fn index_of_lenient(&self, code: char) -> Option<usize> {
        self.indices.get(&code).copied()
    }

    /// Returns true if `code` is one of this alphabet's characters.
    pub fn contains(&self, code: char) -> bool {
        self.indices.contains_key(&code)
    }

    /// Alphabet characters in palette order.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Iterate `(palette index, code)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.chars.iter().copied().enumerate()
    }
}

impl Default for ColorCodes {
    fn default() -> Self {
        let chars: Vec<char> = DEFAULT_ALPHABET.chars().collect();
        let indices = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { chars, indices }
    }
}
