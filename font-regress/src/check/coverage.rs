use skrifa::{raw::types::F26Dot6, GlyphId};

use crate::{
    engine::{Buffer, FontHandle, LoadOptions},
    golden::GoldenEntry,
    report::Finding,
};

/// Number of glyph load failures after which a coverage scan gives up.
pub const GLYPH_ERROR_BUDGET: u32 = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    /// Glyphs below this index were meant to be scanned.
    pub bound: u32,
    /// Glyphs actually attempted.
    pub attempted: u32,
    pub failures: u32,
    /// The scan stopped early because of too many failures.
    pub exhausted: bool,
}

/// Tries to load the outline of every glyph below the supported bound.
///
/// Outlines are loaded with a ppem equal to the font's units per em, which
/// keeps scaling out of the picture. Every failure is recorded; once
/// [`GLYPH_ERROR_BUDGET`] failures have been seen the scan stops.
pub fn scan_glyphs(
    font: &impl FontHandle,
    buf: &mut Buffer,
    golden: &GoldenEntry,
    findings: &mut Vec<Finding>,
) -> CoverageSummary {
    let bound = golden
        .first_unsupported_glyph
        .unwrap_or_else(|| font.num_glyphs());
    let ppem = F26Dot6::from_bits(font.units_per_em() as i32);
    let mut summary = CoverageSummary {
        bound,
        ..Default::default()
    };
    for glyph in 0..bound {
        summary.attempted += 1;
        let result = font.load_glyph(buf, GlyphId::new(glyph), ppem, LoadOptions::default());
        if let Err(error) = result {
            findings.push(Finding::GlyphLoad { glyph, error });
            summary.failures += 1;
        }
        if summary.failures == GLYPH_ERROR_BUDGET {
            findings.push(Finding::CoverageBudgetExhausted {
                failures: summary.failures,
                last_glyph: glyph,
            });
            summary.exhausted = true;
            break;
        }
    }
    log::debug!(
        "coverage: {} of {} glyphs attempted, {} failed",
        summary.attempted,
        summary.bound,
        summary.failures
    );
    summary
}
