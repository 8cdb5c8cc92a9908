//! What checking a font found.

use std::fmt;

use crate::{engine::EngineError, golden::Codepoint, locate::LocateError, Hinting, QualifiedFontId};

/// Why a glyph index could not be used.
#[derive(Debug)]
pub enum LookupFailure {
    /// The engine reported glyph 0 without an error.
    Missing,
    Error(EngineError),
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupFailure::Missing => f.write_str("no glyph index found"),
            LookupFailure::Error(error) => error.fmt(f),
        }
    }
}

/// A kerning sample, as it appears in messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KernQuery {
    pub pair: [Codepoint; 2],
    /// Raw 26.6 value.
    pub ppem: i32,
    pub hinting: Hinting,
}

impl fmt::Display for KernQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kern({}, {}, ppem={}, hinting={})",
            self.pair[0], self.pair[1], self.ppem, self.hinting
        )
    }
}

/// A discrepancy that does not stop the remaining checks for a font.
#[derive(Debug, thiserror::Error)]
pub enum Finding {
    #[error("font version provided differs from the one the tests were written against:\ngot  {got:?}\nwant {want:?}")]
    VersionDrift { got: String, want: String },
    #[error("unable to read the font version: {0}")]
    VersionUnavailable(EngineError),
    #[error("LoadGlyph({glyph}): {error}")]
    GlyphLoad { glyph: u32, error: EngineError },
    #[error("LoadGlyph: too many errors ({failures}), stopped after glyph {last_glyph}")]
    CoverageBudgetExhausted { failures: u32, last_glyph: u32 },
    #[error("GlyphIndex({codepoint}): {error}")]
    MappingLookup {
        codepoint: Codepoint,
        error: EngineError,
    },
    #[error("GlyphIndex({codepoint}): got {got}, want {want}")]
    MappingMismatch {
        codepoint: Codepoint,
        got: u32,
        want: u32,
    },
    #[error("GlyphIndex({codepoint}): golden glyph {want} is not below the glyph count {num_glyphs}")]
    GoldenOutOfRange {
        codepoint: Codepoint,
        want: u32,
        num_glyphs: u32,
    },
    #[error("{query}: GlyphIndex({codepoint}): {failure}")]
    KerningLookup {
        query: KernQuery,
        codepoint: Codepoint,
        failure: LookupFailure,
    },
    #[error("{query}: {error}")]
    KerningQuery { query: KernQuery, error: EngineError },
    #[error("{query}: got {got}, want {want}")]
    KerningMismatch { query: KernQuery, got: i32, want: i32 },
}

impl Finding {
    /// Advisory findings are reported but never fail a font.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Finding::VersionDrift { .. } | Finding::VersionUnavailable(_)
        )
    }
}

/// A problem that ends checking for one font.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error(transparent)]
    Unavailable(#[from] LocateError),
    #[error("Parse: {0}")]
    Parse(EngineError),
    #[error("NumGlyphs: got {got}, want at least {want}")]
    TooFewGlyphs { got: u32, want: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Passed => "ok",
            Status::Failed => "FAILED",
            Status::Skipped => "skipped",
        })
    }
}

/// Everything found while checking one font.
#[derive(Debug)]
pub struct FontReport {
    pub id: QualifiedFontId,
    /// Findings in the order they were made.
    pub findings: Vec<Finding>,
    /// Set when checking stopped early.
    pub fatal: Option<FatalError>,
    /// Set when the font was not checked at all.
    pub skipped: Option<String>,
}

impl FontReport {
    pub(crate) fn new(id: QualifiedFontId) -> Self {
        Self {
            id,
            findings: Vec::new(),
            fatal: None,
            skipped: None,
        }
    }

    pub(crate) fn skipped(id: QualifiedFontId, reason: impl Into<String>) -> Self {
        Self {
            skipped: Some(reason.into()),
            ..Self::new(id)
        }
    }

    pub fn status(&self) -> Status {
        if self.skipped.is_some() {
            Status::Skipped
        } else if self.fatal.is_some() || self.failures().next().is_some() {
            Status::Failed
        } else {
            Status::Passed
        }
    }

    /// Findings that fail the font.
    pub fn failures(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|finding| !finding.is_advisory())
    }

    pub fn advisories(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(|finding| finding.is_advisory())
    }
}

impl fmt::Display for FontReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.id, self.status())?;
        if let Some(reason) = &self.skipped {
            writeln!(f, "  {reason}")?;
        }
        for finding in &self.findings {
            let kind = if finding.is_advisory() {
                "note"
            } else {
                "error"
            };
            for (i, line) in finding.to_string().lines().enumerate() {
                if i == 0 {
                    writeln!(f, "  {kind}: {line}")?;
                } else {
                    writeln!(f, "    {line}")?;
                }
            }
        }
        if let Some(fatal) = &self.fatal {
            for line in fatal.to_string().lines() {
                writeln!(f, "  fatal: {line}")?;
            }
        }
        Ok(())
    }
}
