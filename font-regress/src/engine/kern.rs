//! Pair adjustments from the [kern](https://learn.microsoft.com/en-us/typography/opentype/spec/kern) table.

use ::skrifa::{
    raw::{
        tables::kern::{Kern, Subtable, SubtableKind},
        types::F26Dot6,
        ReadError,
    },
    GlyphId,
};

use super::Hinting;

// OpenType coverage bits not exposed by `Subtable`
const MINIMUM: u16 = 0x0002;
const OVERRIDE: u16 = 0x0008;

/// Returns the horizontal adjustment for `left` followed by `right`, in
/// font units.
///
/// Adjustments from all applicable subtables are accumulated; an OpenType
/// subtable with the override bit set replaces the running total instead.
/// Vertical, cross-stream, minimum, variable and state machine subtables do
/// not apply. A pair with no entry has an adjustment of zero.
pub(crate) fn kerning(kern: &Kern, left: GlyphId, right: GlyphId) -> Result<i32, ReadError> {
    let mut total = 0;
    for subtable in kern.subtables() {
        let subtable = subtable?;
        if !subtable.is_horizontal()
            || subtable.is_cross_stream()
            || subtable.is_variable()
            || subtable.is_state_machine()
        {
            continue;
        }
        let flags = match &subtable {
            Subtable::Ot(subtable) => subtable.coverage(),
            Subtable::Aat(_) => 0,
        };
        if flags & MINIMUM != 0 {
            continue;
        }
        let value = match subtable.kind()? {
            SubtableKind::Format0(subtable) => subtable.kerning(left, right),
            SubtableKind::Format2(subtable) => subtable.kerning(left, right),
            SubtableKind::Format3(subtable) => subtable.kerning(left, right),
            SubtableKind::Format1(_) => None,
        };
        if let Some(value) = value {
            if flags & OVERRIDE != 0 {
                total = value;
            } else {
                total += value;
            }
        }
    }
    Ok(total)
}

/// Scales a value in font units to 26.6 at the given ppem.
///
/// Halves round away from zero. With full hinting the result is then rounded
/// to a whole pixel.
pub(crate) fn scale(units: i32, ppem: F26Dot6, units_per_em: u16, hinting: Hinting) -> F26Dot6 {
    let upem = units_per_em.max(1) as i64;
    let mut scaled = units as i64 * ppem.to_bits() as i64;
    if scaled >= 0 {
        scaled += upem / 2;
    } else {
        scaled -= upem / 2;
    }
    let value = F26Dot6::from_bits((scaled / upem) as i32);
    match hinting {
        Hinting::None => value,
        Hinting::Full => value.round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES_UPEM: u16 = 2048;

    #[test]
    fn scale_unhinted() {
        let ppem = F26Dot6::from_bits(2048);
        assert_eq!(scale(-264, ppem, TIMES_UPEM, Hinting::None).to_bits(), -264);
        assert_eq!(scale(76, ppem, TIMES_UPEM, Hinting::None).to_bits(), 76);
        // -264 * 768 / 2048 = -99.0
        let ppem = F26Dot6::from_bits(768);
        assert_eq!(scale(-264, ppem, TIMES_UPEM, Hinting::None).to_bits(), -99);
        // halves round away from zero
        assert_eq!(scale(1, F26Dot6::from_bits(1024), TIMES_UPEM, Hinting::None).to_bits(), 1);
        assert_eq!(scale(-1, F26Dot6::from_bits(1024), TIMES_UPEM, Hinting::None).to_bits(), -1);
    }

    #[test]
    fn scale_hinted_rounds_to_pixels() {
        let ppem = F26Dot6::from_bits(768);
        assert_eq!(scale(-264, ppem, TIMES_UPEM, Hinting::Full).to_bits(), -128);
        assert_eq!(scale(0, ppem, TIMES_UPEM, Hinting::Full).to_bits(), 0);
        assert_eq!(scale(200, ppem, TIMES_UPEM, Hinting::Full).to_bits(), 64);
    }
}
