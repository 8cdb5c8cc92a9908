//! The checks run against a parsed font.
//!
//! Each check records its findings and returns; none of them stops another
//! from running.

mod coverage;
mod kerning;
mod mapping;
mod version;

pub use coverage::{scan_glyphs, CoverageSummary, GLYPH_ERROR_BUDGET};
pub use kerning::check_kerning;
pub use mapping::check_mappings;
pub use version::check_version;
