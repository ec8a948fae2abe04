//! Palettes and color resolution
//!
//! A [`Palette`] is an ordered list of RGB colors. A [`ColorTable`] pairs it
//! with the [`ColorCodes`] alphabet and answers "what color is this cell?".
//! Both are built once and passed by reference to whatever needs them.

use image::{Rgb, Rgba, RgbaImage};

use crate::codes::ColorCodes;
use crate::color::{parse_color, rgb_from_u32};
use crate::error::{CsefError, Warning};
use crate::grid::{Cell, SpriteGrid};

/// Fully transparent pixel used for empty cells
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An ordered, fixed list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<Rgb<u8>>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Build a palette from packed `0xRRGGBB` values.
    pub fn from_u32(name: impl Into<String>, colors: &[u32]) -> Self {
        Self::new(name, colors.iter().copied().map(rgb_from_u32).collect())
    }

    /// Build a palette from color strings (`#RGB`, `#RRGGBB`, `0xRRGGBB`).
    ///
    /// # Errors
    ///
    /// `Color` for the first entry that fails to parse.
    pub fn from_hex_list<S: AsRef<str>>(
        name: impl Into<String>,
        colors: &[S],
    ) -> Result<Self, CsefError> {
        let colors = colors
            .iter()
            .map(|c| parse_color(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, colors))
    }

    /// Parse a palette file: one `AARRGGBB` color per line, `;` starts a
    /// comment line, blank lines are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use csef::palette::Palette;
    ///
    /// let text = "; PC-66 excerpt\nFF000000\nFF24222A\n";
    /// let palette = Palette::parse_palette_file("pc66", text).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// assert_eq!(palette.get(1), Some(image::Rgb([0x24, 0x22, 0x2a])));
    /// ```
    ///
    /// # Errors
    ///
    /// `Color` for the first line that fails to parse.
    pub fn parse_palette_file(name: impl Into<String>, text: &str) -> Result<Self, CsefError> {
        let colors = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(';'))
            .map(parse_color)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, colors))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb<u8>> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }
}

/// The alphabet and palette together: the read-only lookup every renderer
/// and editor shares.
///
/// # Examples
///
/// ```
/// use csef::codes::ColorCodes;
/// use csef::grid::Cell;
/// use csef::palette::{ColorTable, Palette};
/// use image::Rgb;
///
/// let palette = Palette::from_u32("duo", &[0x000000, 0xFF0000]);
/// let table = ColorTable::new(ColorCodes::default(), palette).unwrap();
/// assert_eq!(table.resolve(Cell::Color('B')), Some(Rgb([255, 0, 0])));
/// assert_eq!(table.resolve(Cell::Transparent), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    codes: ColorCodes,
    palette: Palette,
}

impl ColorTable {
    /// Pair an alphabet with a palette.
    ///
    /// # Errors
    ///
    /// `UnsupportedPaletteSize` if the palette has more colors than the
    /// alphabet has codes.
    pub fn new(codes: ColorCodes, palette: Palette) -> Result<Self, CsefError> {
        if palette.len() > codes.len() {
            return Err(CsefError::UnsupportedPaletteSize {
                index: codes.len(),
                alphabet: codes.len(),
            });
        }
        Ok(Self { codes, palette })
    }

    pub fn codes(&self) -> &ColorCodes {
        &self.codes
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color of a cell, or `None` for "no pixel".
    ///
    /// Codes outside the alphabet, and codes past the end of the palette,
    /// also resolve to `None`.
    pub fn resolve(&self, cell: Cell) -> Option<Rgb<u8>> {
        match cell {
            Cell::Transparent => None,
            Cell::Color(c) => self
                .codes
                .index_of_lenient(c)
                .and_then(|index| self.palette.get(index)),
        }
    }

    /// Color of a cell, failing on unknown codes.
    ///
    /// # Errors
    ///
    /// `UnknownColorCode` if the code is not in the alphabet or has no
    /// palette entry.
    pub fn resolve_strict(&self, cell: Cell) -> Result<Option<Rgb<u8>>, CsefError> {
        match cell {
            Cell::Transparent => Ok(None),
            Cell::Color(c) => {
                let index = self.codes.index_of(c)?;
                match index.and_then(|i| self.palette.get(i)) {
                    Some(color) => Ok(Some(color)),
                    None => Err(CsefError::UnknownColorCode(c)),
                }
            }
        }
    }

    /// Resolve every cell of a grid into an RGBA buffer.
    ///
    /// Empty cells, cells of a short final row, and unknown codes become
    /// transparent pixels. Each distinct unknown code generates one warning.
    pub fn to_rgba_image(&self, grid: &SpriteGrid) -> (RgbaImage, Vec<Warning>) {
        let mut warnings = Vec::new();
        let mut reported: Vec<char> = Vec::new();
        let width = grid.width();
        let mut image = RgbaImage::from_pixel(width as u32, grid.height() as u32, TRANSPARENT);

        for (y, row) in grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().take(width).enumerate() {
                match self.resolve(*cell) {
                    Some(Rgb([r, g, b])) => {
                        image.put_pixel(x as u32, y as u32, Rgba([r, g, b, 255]));
                    }
                    None => {
                        if let Cell::Color(c) = cell {
                            if !reported.contains(c) {
                                reported.push(*c);
                                warnings.push(Warning::new(
                                    y * width + x,
                                    format!("unknown color code '{}' drawn as transparent", c),
                                ));
                            }
                        }
                    }
                }
            }
        }

        (image, warnings)
    }
}

impl Default for ColorTable {
    /// The game's alphabet and PC-66 palette.
    fn default() -> Self {
        Self {
            codes: ColorCodes::default(),
            palette: crate::palettes::get_builtin(crate::palettes::DEFAULT_PALETTE)
                .unwrap_or_else(|| Palette::new("empty", Vec::new())),
        }
    }
}
