//! Sprite grid data model
//!
//! A [`SpriteGrid`] is the decoded form of a CSEF string: rows of [`Cell`]s,
//! each either a color code or transparent. Grids are plain values; every
//! transform builds a new grid.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codes::{is_transparent, ColorCodes, TRANSPARENT};
use crate::error::CsefError;

/// One pixel of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// No pixel (`.` or ` ` in text form)
    #[default]
    Transparent,
    /// A color code character
    Color(char),
}

impl Cell {
    /// Read a cell from its character form.
    pub fn from_char(c: char) -> Self {
        if is_transparent(c) {
            Cell::Transparent
        } else {
            Cell::Color(c)
        }
    }

    /// Character form; transparent cells print as `.`.
    pub fn to_char(self) -> char {
        match self {
            Cell::Transparent => TRANSPARENT,
            Cell::Color(c) => c,
        }
    }

    pub fn is_transparent(self) -> bool {
        self == Cell::Transparent
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell::from_char(c)
    }
}

/// Palette-index form of a sprite, as drawn in an editor (`None` = empty).
pub type IndexGrid = Vec<Vec<Option<usize>>>;

/// Tight rectangle around the non-transparent cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A rectangular matrix of cells.
///
/// `width` comes from the caller, `height` is the number of rows. Every row
/// holds `width` cells, except that a decoder may leave the last row short
/// when its input ended mid-row. Reads past the end of a short row return
/// [`Cell::Transparent`].
///
/// # Examples
///
/// ```
/// use csef::grid::{Cell, SpriteGrid};
///
/// let grid = SpriteGrid::parse(".AA.\nABBA").unwrap();
/// assert_eq!(grid.width(), 4);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.cell(0, 0), Cell::Transparent);
/// assert_eq!(grid.cell(1, 1), Cell::Color('B'));
/// assert_eq!(grid.to_string(), ".AA.\nABBA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GridRows", from = "GridRows")]
pub struct SpriteGrid {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl SpriteGrid {
    /// An empty sprite (zero rows) of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// A grid of `height` fully transparent rows.
    pub fn transparent(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Transparent; width]; height],
        }
    }

    /// Build a grid from rows of cells. Rows are taken as given.
    pub fn from_rows(width: usize, rows: Vec<Vec<Cell>>) -> Self {
        Self { width, rows }
    }

    /// Parse the text form: one line per row, one character per cell.
    ///
    /// The width is the longest line; shorter lines are padded with
    /// transparent cells.
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if the text has no cells at all.
    pub fn parse(text: &str) -> Result<Self, CsefError> {
        let width = text_lines(text)
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Err(CsefError::InvalidWidth(0));
        }
        Self::parse_with_width(text, width)
    }

    /// Parse the text form with an explicit width.
    ///
    /// Short lines are padded with transparent cells, long lines are cut.
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if `width` is zero.
    pub fn parse_with_width(text: &str, width: usize) -> Result<Self, CsefError> {
        if width == 0 {
            return Err(CsefError::InvalidWidth(width));
        }
        let rows = text_lines(text)
            .map(|line| {
                let mut row: Vec<Cell> = line.chars().take(width).map(Cell::from_char).collect();
                row.resize(width, Cell::Transparent);
                row
            })
            .collect();
        Ok(Self { width, rows })
    }

    /// Build a grid from palette indices.
    ///
    /// # Errors
    ///
    /// `UnsupportedPaletteSize` if an index has no code in the alphabet.
    pub fn from_indices(
        width: usize,
        pixels: &[Vec<Option<usize>>],
        codes: &ColorCodes,
    ) -> Result<Self, CsefError> {
        let rows = pixels
            .iter()
            .map(|row| -> Result<Vec<Cell>, CsefError> {
                let mut cells = Vec::with_capacity(width);
                for pixel in row.iter().take(width) {
                    cells.push(match pixel {
                        Some(index) => Cell::Color(codes.code_of(*index)?),
                        None => Cell::Transparent,
                    });
                }
                cells.resize(width, Cell::Transparent);
                Ok(cells)
            })
            .collect::<Result<Vec<_>, CsefError>>()?;
        Ok(Self { width, rows })
    }

    /// Convert to palette indices.
    ///
    /// # Errors
    ///
    /// `UnknownColorCode` for a cell whose code is not in the alphabet.
    pub fn to_indices(&self, codes: &ColorCodes) -> Result<IndexGrid, CsefError> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Transparent => Ok(None),
                        Cell::Color(c) => codes.index_of(*c),
                    })
                    .collect()
            })
            .collect()
    }

    /// Convert to palette indices, treating unknown codes as empty pixels.
    pub fn to_indices_lenient(&self, codes: &ColorCodes) -> IndexGrid {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Transparent => None,
                        Cell::Color(c) => codes.index_of_lenient(*c),
                    })
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell at `(row, col)`; transparent outside the stored cells.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }

    /// True when every row holds exactly `width` cells.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.width)
    }

    /// Copy of the grid with every row padded or cut to `width` cells.
    pub fn normalized(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row: Vec<Cell> = row.iter().take(self.width).copied().collect();
                row.resize(self.width, Cell::Transparent);
                row
            })
            .collect();
        Self {
            width: self.width,
            rows,
        }
    }

    /// Tight box around the non-transparent cells, or `None` if there are none.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0;
        let mut max_y = 0;

        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().take(self.width).enumerate() {
                if !cell.is_transparent() {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if min_x == usize::MAX {
            return None;
        }

        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Copy out the cells inside `bbox`.
    pub fn crop(&self, bbox: BoundingBox) -> Self {
        let rows = (bbox.y..bbox.y + bbox.height)
            .map(|y| (bbox.x..bbox.x + bbox.width).map(|x| self.cell(y, x)).collect())
            .collect();
        Self {
            width: bbox.width,
            rows,
        }
    }

    /// Number of non-transparent cells.
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_transparent())
            .count()
    }
}

impl fmt::Display for SpriteGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

/// Serialized form: the width plus each row as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridRows {
    width: usize,
    height: usize,
    rows: Vec<String>,
}

impl From<SpriteGrid> for GridRows {
    fn from(grid: SpriteGrid) -> Self {
        GridRows {
            width: grid.width,
            height: grid.rows.len(),
            rows: grid
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_char()).collect())
                .collect(),
        }
    }
}

impl From<GridRows> for SpriteGrid {
    fn from(rows: GridRows) -> Self {
        SpriteGrid {
            width: rows.width,
            rows: rows
                .rows
                .iter()
                .map(|row| row.chars().map(Cell::from_char).collect())
                .collect(),
        }
    }
}

fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(|line| line.trim_end_matches('\r'))
}
