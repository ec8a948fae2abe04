//! Token extraction from CSEF strings
//!
//! The grammar has four tokens:
//!
//! | Token | Text        | Meaning                                        |
//! |-------|-------------|------------------------------------------------|
//! | run   | `<1-9><c>`  | append `c` to the current row 1 to 9 times     |
//! | `~`   | `~`         | a full transparent row (row boundary only)     |
//! | `^`   | `^`         | repeat the previous row (row boundary only)    |
//! | `>`   | `>`         | finish the row by mirroring its left half      |
//!
//! Tokenizing is context free: whether `~`, `^` and `>` are legal depends on
//! the row being assembled, which only the decoder knows. Characters that
//! cannot start any token are reported and skipped one at a time, so a bad
//! character never shifts the tokens that follow it.

use std::fmt;
use std::iter::FusedIterator;

use crate::codes::{EMPTY_ROW, REPEAT_ROW, SYMMETRY};
use crate::error::{CsefError, Warning};

/// Longest run a single token can express.
pub const MAX_RUN: usize = 9;

/// A CSEF token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `count` copies of `code`, `count` in `1..=9`
    Run { count: u8, code: char },
    /// `~`
    EmptyRow,
    /// `^`
    RepeatRow,
    /// `>`
    Symmetry,
}

impl Token {
    /// Number of input characters this token spans.
    pub fn len(self) -> usize {
        match self {
            Token::Run { .. } => 2,
            _ => 1,
        }
    }

    /// Tokens are never empty; provided for symmetry with [`len`](Self::len).
    pub fn is_empty(self) -> bool {
        false
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Run { count, code } => write!(f, "{}{}", count, code),
            Token::EmptyRow => write!(f, "{}", EMPTY_ROW),
            Token::RepeatRow => write!(f, "{}", REPEAT_ROW),
            Token::Symmetry => write!(f, "{}", SYMMETRY),
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub position: usize,
    pub token: Token,
}

/// Iterator over the tokens of a CSEF string.
///
/// Yields `Err(MalformedToken)` for each character that cannot start a token
/// and resumes at the next character.
#[derive(Debug, Clone)]
pub struct Tokens {
    chars: Vec<char>,
    pos: usize,
}

impl Tokens {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }
}

impl Iterator for Tokens {
    type Item = Result<Spanned, CsefError>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.pos;
        let c = *self.chars.get(position)?;

        let token = match c {
            EMPTY_ROW => Token::EmptyRow,
            REPEAT_ROW => Token::RepeatRow,
            SYMMETRY => Token::Symmetry,
            '1'..='9' => match self.chars.get(position + 1) {
                Some(&code) => Token::Run {
                    count: c as u8 - b'0',
                    code,
                },
                None => {
                    self.pos += 1;
                    return Some(Err(CsefError::malformed(
                        position,
                        format!("run '{}' is missing its color code", c),
                    )));
                }
            },
            '0' => {
                self.pos += 1;
                return Some(Err(CsefError::malformed(
                    position,
                    "'0' is not a valid run length",
                )));
            }
            other => {
                self.pos += 1;
                return Some(Err(CsefError::malformed(
                    position,
                    format!("unexpected character '{}'", other.escape_debug()),
                )));
            }
        };

        self.pos += token.len();
        Some(Ok(Spanned { position, token }))
    }
}

impl FusedIterator for Tokens {}

/// Extracts tokens from a CSEF string.
///
/// Characters that cannot start a token generate warnings and are skipped.
///
/// # Examples
///
/// ```
/// use csef::tokenizer::{tokenize, Token};
///
/// let (tokens, warnings) = tokenize("~3A>^");
/// let kinds: Vec<Token> = tokens.iter().map(|t| t.token).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         Token::EmptyRow,
///         Token::Run { count: 3, code: 'A' },
///         Token::Symmetry,
///         Token::RepeatRow,
///     ]
/// );
/// assert!(warnings.is_empty());
///
/// let (tokens, warnings) = tokenize("x2B");
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(warnings.len(), 1); // warning for 'x'
/// ```
pub fn tokenize(input: &str) -> (Vec<Spanned>, Vec<Warning>) {
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();

    for item in Tokens::new(input) {
        match item {
            Ok(spanned) => tokens.push(spanned),
            Err(err) => warnings.push(Warning::from(err)),
        }
    }

    (tokens, warnings)
}

/// Render tokens back to CSEF text.
pub fn to_csef(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

/// Token counts by kind, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TokenStats {
    pub runs: usize,
    pub empty_rows: usize,
    pub repeat_rows: usize,
    pub symmetry: usize,
    pub skipped: usize,
}

impl TokenStats {
    /// Count the tokens of a CSEF string.
    pub fn of(input: &str) -> Self {
        let mut stats = Self::default();
        for item in Tokens::new(input) {
            match item.map(|s| s.token) {
                Ok(Token::Run { .. }) => stats.runs += 1,
                Ok(Token::EmptyRow) => stats.empty_rows += 1,
                Ok(Token::RepeatRow) => stats.repeat_rows += 1,
                Ok(Token::Symmetry) => stats.symmetry += 1,
                Err(_) => stats.skipped += 1,
            }
        }
        stats
    }
}
