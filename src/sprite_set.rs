//! Named sprite sets.
//!
//! A character's frames are decoded once into a [`SpriteSet`]. Frames that
//! are only horizontal flips of other frames are not stored as CSEF at all;
//! [`SpriteSet::with_mirrored`] derives them from their sources.

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::decoder::{DecodeMode, Decoder};
use crate::error::{CsefError, Warning};
use crate::grid::SpriteGrid;
use crate::transforms::mirror_horizontal;

/// Climbing frames that face left, as (source, mirrored) pairs.
pub const CLIMB_MIRRORS: &[(&str, &str)] = &[("RUP0", "LUP0"), ("RUP1", "LUP1")];

/// Decoded frames keyed by name, all sharing one width.
///
/// # Examples
///
/// ```
/// use csef::sprite_set::{SpriteSet, CLIMB_MIRRORS};
///
/// let set = SpriteSet::decode(4, [("RUP0", "2A2."), ("RUP1", "1.3A")]).unwrap();
/// let set = set.with_mirrored(CLIMB_MIRRORS).unwrap();
/// assert_eq!(set.get("LUP0").unwrap().to_string(), "..AA");
/// assert_eq!(set.get("LUP1").unwrap().to_string(), "AAA.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
    width: usize,
    sprites: BTreeMap<String, SpriteGrid>,
    warnings: Vec<(String, Warning)>,
}

impl SpriteSet {
    /// Create an empty set for sprites of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Decode named CSEF literals leniently.
    ///
    /// Skipped characters are kept per sprite and available from
    /// [`SpriteSet::warnings`].
    pub fn decode<I, K, V>(width: usize, sources: I) -> Result<Self, CsefError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::decode_with(&Decoder::new(width)?, sources)
    }

    /// Decode named CSEF literals in strict mode.
    pub fn decode_strict<I, K, V>(width: usize, sources: I) -> Result<Self, CsefError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::decode_with(&Decoder::new(width)?.with_mode(DecodeMode::Strict), sources)
    }

    /// Decode named CSEF literals with a configured decoder.
    pub fn decode_with<I, K, V>(decoder: &Decoder, sources: I) -> Result<Self, CsefError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut set = Self::new(decoder.width());
        for (name, source) in sources {
            let name = name.into();
            let decoded = decoder.decode(source.as_ref())?;
            for warning in &decoded.warnings {
                warn!("sprite '{}': {}", name, warning);
            }
            set.warnings
                .extend(decoded.warnings.into_iter().map(|w| (name.clone(), w)));
            set.sprites.insert(name, decoded.grid);
        }
        Ok(set)
    }

    /// Add or replace a sprite.
    pub fn insert(&mut self, name: impl Into<String>, grid: SpriteGrid) {
        self.sprites.insert(name.into(), grid);
    }

    pub fn get(&self, name: &str) -> Option<&SpriteGrid> {
        self.sprites.get(name)
    }

    /// Look up a sprite, failing with `MissingSprite`.
    pub fn require(&self, name: &str) -> Result<&SpriteGrid, CsefError> {
        self.get(name)
            .ok_or_else(|| CsefError::MissingSprite(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpriteGrid)> {
        self.sprites.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Warnings from lenient decoding, tagged with the sprite name.
    pub fn warnings(&self) -> &[(String, Warning)] {
        &self.warnings
    }

    /// A copy of this set with a mirrored sprite added for every pair.
    ///
    /// Each pair is `(source, target)`; `target` is set to the horizontal
    /// mirror of `source`, replacing anything stored under that name.
    /// Pairs are applied in order, so a later pair may mirror an earlier
    /// target.
    ///
    /// # Errors
    ///
    /// `MissingSprite` if a source is not in the set.
    pub fn with_mirrored(&self, pairs: &[(&str, &str)]) -> Result<Self, CsefError> {
        let mut set = self.clone();
        for (source, target) in pairs {
            let mirrored = mirror_horizontal(set.require(source)?);
            debug!("mirrored '{}' into '{}'", source, target);
            set.sprites.insert((*target).to_string(), mirrored);
        }
        Ok(set)
    }
}
