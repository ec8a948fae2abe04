//! Error and warning types shared by the codec
//!
//! Strict operations fail with [`CsefError`]. Lenient operations never fail on
//! malformed input; they skip the offending character and record a [`Warning`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorError;

/// Error type for codec failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CsefError {
    /// Decoding width must be at least one cell
    #[error("invalid width {0}, expected a width of at least 1")]
    InvalidWidth(usize),
    /// A token that is structurally illegal at its position (strict mode only)
    #[error("malformed token at position {position}: {reason}")]
    MalformedToken { position: usize, reason: String },
    /// A palette index has no character in the alphabet
    #[error("palette index {index} has no color code (alphabet holds {alphabet} codes)")]
    UnsupportedPaletteSize { index: usize, alphabet: usize },
    /// A character that is neither an alphabet code nor a transparent marker
    #[error("unknown color code '{0}'")]
    UnknownColorCode(char),
    /// An alphabet tried to claim a grammar or transparency character
    #[error("'{0}' is reserved by the grammar and cannot be a color code")]
    ReservedCode(char),
    /// An alphabet listed the same character twice
    #[error("duplicate color code '{0}' in alphabet")]
    DuplicateCode(char),
    /// A sprite set was asked for a name it does not hold
    #[error("sprite '{0}' not found")]
    MissingSprite(String),
    /// Import text that holds no encoded sprite
    #[error("invalid snippet: {0}")]
    InvalidSnippet(String),
    /// Palette color that failed to parse
    #[error(transparent)]
    Color(#[from] ColorError),
}

impl CsefError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            position,
            reason: reason.into(),
        }
    }
}

/// A warning generated while decoding in lenient mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Character offset of the skipped input
    pub position: usize,
    pub message: String,
}

impl Warning {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "position {}: {}", self.position, self.message)
    }
}

impl From<CsefError> for Warning {
    fn from(err: CsefError) -> Self {
        match err {
            CsefError::MalformedToken { position, reason } => Warning::new(position, reason),
            other => Warning::new(0, other.to_string()),
        }
    }
}
