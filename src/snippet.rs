//! Editor snippets: the text form sprites are copied in and out as.
//!
//! A snippet is a width plus an encoded string, written
//! `width: 30, encoded: '...'`. Import is forgiving: a quoted string or a
//! bare code is accepted too, with the width taken from any `width` mention
//! in the text or falling back to the game's sprite width.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::decoder::{DecodeMode, Decoded, Decoder};
use crate::encoder::Encoded;
use crate::error::CsefError;

/// Width assumed when a snippet does not state one.
pub const DEFAULT_SNIPPET_WIDTH: usize = 30;

/// `width: N, encoded: '...'` with either quote style.
static FULL_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"width:\s*(\d+),\s*encoded:\s*(?:'([^']+)'|"([^"]+)")"#)
        .expect("invalid snippet regex")
});

/// First quoted string. Quotes must pair, since `"` is itself a color code.
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^']+)'|"([^"]+)""#).expect("invalid quote regex"));

static WIDTH_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)width[:\s]+(\d+)").expect("invalid width regex"));

/// A sprite in the editor's copy/paste form.
///
/// # Examples
///
/// ```
/// use csef::snippet::Snippet;
///
/// let snippet = Snippet::parse("width: 4, encoded: '1A1B>'").unwrap();
/// assert_eq!(snippet.width, 4);
/// assert_eq!(snippet.encoded, "1A1B>");
/// assert_eq!(snippet.to_string(), "width: 4, encoded: '1A1B>'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub width: usize,
    pub encoded: String,
}

impl Snippet {
    pub fn new(width: usize, encoded: impl Into<String>) -> Self {
        Self {
            width,
            encoded: encoded.into(),
        }
    }

    /// Read a snippet from pasted text.
    ///
    /// Tried in order: the full `width: N, encoded: '...'` form, then the
    /// first quoted string, then the whole trimmed input. Outside the full
    /// form the width is the first `width N` / `width: N` mention, or 30.
    ///
    /// # Errors
    ///
    /// `InvalidSnippet` if there is no code to read or the width is not a
    /// positive number.
    pub fn parse(text: &str) -> Result<Self, CsefError> {
        Self::parse_with_default(text, DEFAULT_SNIPPET_WIDTH)
    }

    /// [`Snippet::parse`] with a different fallback width.
    pub fn parse_with_default(text: &str, default_width: usize) -> Result<Self, CsefError> {
        let input = text.trim();
        if input.is_empty() {
            return Err(CsefError::InvalidSnippet("no code given".to_string()));
        }

        if let Some(caps) = FULL_FORM.captures(input) {
            let width = parse_width(&caps[1])?;
            let encoded = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            return Ok(Self::new(width, encoded));
        }

        let encoded = match QUOTED.captures(input) {
            Some(caps) => caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str()),
            None => input,
        };
        if encoded.is_empty() {
            return Err(CsefError::InvalidSnippet("no code given".to_string()));
        }

        let width = match WIDTH_MENTION.captures(input) {
            Some(caps) => parse_width(&caps[1])?,
            None => default_width,
        };
        log::debug!("snippet without full form, using width {}", width);

        Ok(Self::new(width, encoded))
    }

    /// Decode the snippet's code at its width.
    pub fn decode(&self, mode: DecodeMode) -> Result<Decoded, CsefError> {
        Decoder::new(self.width)?.with_mode(mode).decode(&self.encoded)
    }

    /// The editor's export block for an encoding.
    ///
    /// ```text
    /// // CSEF Format
    /// // Size: 4 characters
    /// // Width: 2px, Height: 1px
    /// width: 2, encoded: '1A1B'
    /// ```
    ///
    /// An encoding of size 0 exports as `// Empty canvas`.
    pub fn export_comment(encoded: &Encoded) -> String {
        if encoded.size == 0 {
            return "// Empty canvas".to_string();
        }
        format!(
            "// CSEF Format\n// Size: {} characters\n// Width: {}px, Height: {}px\n{}",
            encoded.size,
            encoded.width,
            encoded.height,
            Snippet::from(encoded)
        )
    }
}

fn parse_width(digits: &str) -> Result<usize, CsefError> {
    match digits.parse::<usize>() {
        Ok(0) | Err(_) => Err(CsefError::InvalidSnippet(format!("invalid width '{}'", digits))),
        Ok(width) => Ok(width),
    }
}

impl From<&Encoded> for Snippet {
    fn from(encoded: &Encoded) -> Self {
        Self::new(encoded.width, encoded.encoded.clone())
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "width: {}, encoded: '{}'", self.width, self.encoded)
    }
}
