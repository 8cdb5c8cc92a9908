//! The operations the harness needs from a font engine.
//!
//! The harness never looks inside a font itself; it only calls through
//! [`Engine`] and [`FontHandle`]. [`SkrifaEngine`] is the implementation used
//! against real fonts.

use std::fmt;

use ::skrifa::{
    outline::{pen::PathElement, DrawError},
    raw::{
        types::{F26Dot6, Tag},
        ReadError,
    },
    string::StringId,
    GlyphId,
};
use serde::Deserialize;

mod kern;
mod pen;
mod skrifa;

pub use self::skrifa::SkrifaEngine;

/// Hinting applied when computing scaled values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hinting {
    #[default]
    None,
    /// Round to whole pixels.
    Full,
}

impl fmt::Display for Hinting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hinting::None => f.write_str("none"),
            Hinting::Full => f.write_str("full"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub hinting: Hinting,
}

/// Scratch space reused across engine calls for a single font.
///
/// A buffer carries no state between fonts; every font under test gets a
/// fresh one.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    pub(crate) outline: Vec<PathElement>,
    pub(crate) text: String,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Unable to parse font: {0}")]
    Parse(ReadError),
    #[error("Missing or malformed '{0}' table")]
    MissingTable(Tag),
    #[error("Glyph {0} not found")]
    GlyphNotFound(GlyphId),
    #[error("Failed to draw glyph {0}: {1}")]
    Draw(GlyphId, DrawError),
    #[error("Name {0} not found")]
    NameNotFound(StringId),
    #[error("Font has no supported character map")]
    NoCharmap,
    #[error("Malformed kern table: {0}")]
    Kern(ReadError),
}

/// Something that can turn font bytes into a [`FontHandle`].
pub trait Engine {
    type Font<'a>: FontHandle
    where
        Self: 'a;

    fn parse<'a>(&'a self, data: &'a [u8]) -> Result<Self::Font<'a>, EngineError>;
}

/// A parsed font.
///
/// Scaled values (`ppem` arguments, outline coordinates and kerning) are in
/// 26.6 fixed point units. A `ppem` whose raw value equals the font's units
/// per em therefore produces values in font units.
pub trait FontHandle {
    fn num_glyphs(&self) -> u32;

    fn units_per_em(&self) -> u16;

    fn name<'b>(&self, buf: &'b mut Buffer, id: StringId) -> Result<&'b str, EngineError>;

    fn load_glyph<'b>(
        &self,
        buf: &'b mut Buffer,
        glyph_id: GlyphId,
        ppem: F26Dot6,
        options: LoadOptions,
    ) -> Result<&'b [PathElement], EngineError>;

    /// Returns glyph 0 when the font does not map `codepoint`.
    fn glyph_index(&self, buf: &mut Buffer, codepoint: u32) -> Result<GlyphId, EngineError>;

    fn kern(
        &self,
        buf: &mut Buffer,
        left: GlyphId,
        right: GlyphId,
        ppem: F26Dot6,
        hinting: Hinting,
    ) -> Result<F26Dot6, EngineError>;
}
