//! Runs every check against every font.

use rayon::prelude::*;

use crate::{
    check::{check_kerning, check_mappings, check_version, scan_glyphs},
    config::{HarnessConfig, ENABLE_FLAG, ENABLE_VAR},
    engine::{Buffer, Engine, FontHandle},
    golden::DatasetRegistry,
    locate::FontLocator,
    report::{FatalError, FontReport},
    QualifiedFontId,
};

/// Checks fonts from disk against golden data with a particular engine.
pub struct Harness<E> {
    config: HarnessConfig,
    registry: DatasetRegistry,
    locator: FontLocator,
    engine: E,
}

impl<E: Engine> Harness<E> {
    pub fn new(config: HarnessConfig, registry: DatasetRegistry, engine: E) -> Self {
        let locator = FontLocator::new(&config);
        Self {
            config,
            registry,
            locator,
            engine,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn locator(&self) -> &FontLocator {
        &self.locator
    }

    /// Reads the font named by `id` and checks it.
    ///
    /// Nothing is read when checking is disabled; the report is skipped.
    pub fn check_font(&self, id: &QualifiedFontId) -> FontReport {
        if !self.config.enabled {
            return FontReport::skipped(
                id.clone(),
                format!("checking is disabled, pass {ENABLE_FLAG} or set {ENABLE_VAR}=1 to enable"),
            );
        }
        log::info!("checking {id}");
        match self.locator.resolve(id) {
            Ok(data) => self.check_data(id, &data),
            Err(e) => {
                log::error!("{e}");
                let mut report = FontReport::new(id.clone());
                report.fatal = Some(e.into());
                report
            }
        }
    }

    /// Checks font data that has already been read, regardless of whether
    /// checking is enabled.
    ///
    /// A font with no golden data registered for `id` only has to parse.
    pub fn check_data(&self, id: &QualifiedFontId, data: &[u8]) -> FontReport {
        let mut report = FontReport::new(id.clone());
        let font = match self.engine.parse(data) {
            Ok(font) => font,
            Err(e) => {
                log::error!("{id}: failed to parse: {e}");
                report.fatal = Some(FatalError::Parse(e));
                return report;
            }
        };
        let Some(golden) = self.registry.get(id) else {
            log::info!("{id}: no golden data, only checked that it parses");
            return report;
        };
        let mut buf = Buffer::new();
        check_version(&font, &mut buf, golden, &mut report.findings);
        let num_glyphs = font.num_glyphs();
        if num_glyphs < golden.min_glyph_count {
            log::error!(
                "{id}: {num_glyphs} glyphs, expected at least {}",
                golden.min_glyph_count
            );
            report.fatal = Some(FatalError::TooFewGlyphs {
                got: num_glyphs,
                want: golden.min_glyph_count,
            });
            return report;
        }
        scan_glyphs(&font, &mut buf, golden, &mut report.findings);
        check_mappings(&font, &mut buf, golden, &mut report.findings);
        check_kerning(&font, &mut buf, golden, &mut report.findings);
        log::info!("{id}: {}", report.status());
        report
    }

    /// Checks the given fonts, or every registered font when `ids` is empty.
    ///
    /// Reports are returned in the order the fonts were given (registry order
    /// for the default set), whether or not they were checked in parallel.
    pub fn run(&self, ids: &[QualifiedFontId]) -> Vec<FontReport>
    where
        E: Sync,
    {
        let ids: Vec<&QualifiedFontId> = if ids.is_empty() {
            self.registry.iter().map(|(id, _)| id).collect()
        } else {
            ids.iter().collect()
        };
        if self.config.parallel && self.config.enabled {
            ids.par_iter().map(|id| self.check_font(id)).collect()
        } else {
            ids.iter().map(|id| self.check_font(id)).collect()
        }
    }
}
