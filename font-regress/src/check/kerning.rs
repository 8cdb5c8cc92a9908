use skrifa::GlyphId;

use crate::{
    engine::{Buffer, FontHandle},
    golden::{Codepoint, GoldenEntry, KernCase},
    report::{Finding, KernQuery, LookupFailure},
};

/// Checks every golden kerning sample, in order.
///
/// Kerning is directional, so each case is checked on its own and a reversed
/// pair is never assumed to share a value.
pub fn check_kerning(
    font: &impl FontHandle,
    buf: &mut Buffer,
    golden: &GoldenEntry,
    findings: &mut Vec<Finding>,
) {
    let mut failures = 0;
    for case in &golden.kern {
        if let Err(finding) = check_case(font, buf, case) {
            findings.push(finding);
            failures += 1;
        }
    }
    log::debug!("kerning: {} samples, {failures} failed", golden.kern.len());
}

fn check_case(font: &impl FontHandle, buf: &mut Buffer, case: &KernCase) -> Result<(), Finding> {
    let query = KernQuery {
        pair: case.pair,
        ppem: case.ppem.to_bits(),
        hinting: case.hinting,
    };
    let left = resolve(font, buf, query, case.pair[0])?;
    let right = resolve(font, buf, query, case.pair[1])?;
    let got = font
        .kern(buf, left, right, case.ppem, case.hinting)
        .map_err(|error| Finding::KerningQuery { query, error })?
        .to_bits();
    if got != case.want {
        return Err(Finding::KerningMismatch {
            query,
            got,
            want: case.want,
        });
    }
    Ok(())
}

/// Glyph 0 means the font has no glyph for the codepoint, which makes the
/// sample meaningless.
fn resolve(
    font: &impl FontHandle,
    buf: &mut Buffer,
    query: KernQuery,
    codepoint: Codepoint,
) -> Result<GlyphId, Finding> {
    let failure = match font.glyph_index(buf, codepoint.to_u32()) {
        Ok(glyph_id) if glyph_id == GlyphId::NOTDEF => LookupFailure::Missing,
        Ok(glyph_id) => return Ok(glyph_id),
        Err(error) => LookupFailure::Error(error),
    };
    Err(Finding::KerningLookup {
        query,
        codepoint,
        failure,
    })
}
