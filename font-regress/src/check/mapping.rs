use crate::{
    engine::{Buffer, FontHandle},
    golden::GoldenEntry,
    report::Finding,
};

/// Checks every golden codepoint to glyph index sample.
///
/// A failed or wrong lookup is recorded and checking moves on to the next
/// sample, so one bad mapping never hides another.
pub fn check_mappings(
    font: &impl FontHandle,
    buf: &mut Buffer,
    golden: &GoldenEntry,
    findings: &mut Vec<Finding>,
) {
    let num_glyphs = font.num_glyphs();
    let mut failures = 0;
    for (&codepoint, &want) in &golden.glyph_index {
        if want >= num_glyphs {
            findings.push(Finding::GoldenOutOfRange {
                codepoint,
                want,
                num_glyphs,
            });
            failures += 1;
            continue;
        }
        match font.glyph_index(buf, codepoint.to_u32()) {
            Ok(got) if got.to_u32() == want => (),
            Ok(got) => {
                findings.push(Finding::MappingMismatch {
                    codepoint,
                    got: got.to_u32(),
                    want,
                });
                failures += 1;
            }
            Err(error) => {
                findings.push(Finding::MappingLookup { codepoint, error });
                failures += 1;
            }
        }
    }
    log::debug!(
        "mapping: {} samples, {failures} failed",
        golden.glyph_index.len()
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{engine::testing::FakeFont, golden::Codepoint};

    fn golden(samples: &[(u32, u32)]) -> GoldenEntry {
        GoldenEntry {
            min_glyph_count: 1,
            glyph_index: samples
                .iter()
                .map(|(cp, gid)| (Codepoint::new(*cp), *gid))
                .collect(),
            ..Default::default()
        }
    }

    fn check(font: &FakeFont, golden: &GoldenEntry) -> Vec<String> {
        let mut findings = vec![];
        check_mappings(&font, &mut Buffer::new(), golden, &mut findings);
        findings.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn all_samples_match() {
        // Arial
        let font = FakeFont::new(1200).map('A', 36).map('\u{f1}', 120);
        let entry = golden(&[(0x41, 36), (0xF1, 120), (0x1F100, 0)]);
        assert!(check(&font, &entry).is_empty());
    }

    #[test]
    fn symbol_font_remaps_latin() {
        // Webdings maps the private use area instead of Latin letters
        let font = FakeFont::new(230).map('\u{f041}', 36).map('\u{f042}', 37);
        let entry = golden(&[(0x41, 0), (0x42, 0), (0xF041, 36), (0xF042, 37)]);
        assert!(check(&font, &entry).is_empty());
        // Times New Roman leaves the private use area unmapped
        let font = FakeFont::new(1300).map('A', 36).map('B', 37);
        let entry = golden(&[(0x41, 36), (0x42, 37), (0xF041, 0), (0xF042, 0)]);
        assert!(check(&font, &entry).is_empty());
    }

    #[test]
    fn report_every_mismatch() {
        let mut font = FakeFont::new(100).map('A', 36).map('B', 38).map('C', 40);
        font.broken_codepoints.insert('B' as u32);
        let entry = golden(&[(0x41, 35), (0x42, 37), (0x43, 39), (0x44, 0)]);
        assert_eq!(
            check(&font, &entry),
            [
                "GlyphIndex(U+0041): got 36, want 35",
                "GlyphIndex(U+0042): Font has no supported character map",
                "GlyphIndex(U+0043): got 40, want 39",
            ]
        );
    }

    #[test]
    fn golden_index_must_exist() {
        let font = FakeFont::new(10).map('A', 5);
        let entry = golden(&[(0x41, 5), (0x42, 10)]);
        assert_eq!(
            check(&font, &entry),
            ["GlyphIndex(U+0042): golden glyph 10 is not below the glyph count 10"]
        );
    }
}
