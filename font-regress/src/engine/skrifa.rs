use ::skrifa::{
    charmap::Charmap,
    outline::{pen::PathElement, DrawSettings, Engine as Hinter, HintingInstance, HintingOptions},
    prelude::{LocationRef, Size},
    raw::{
        types::{F26Dot6, Tag},
        FontRef, ReadError, TableProvider,
    },
    string::StringId,
    GlyphId, MetadataProvider, OutlineGlyphCollection,
};

use super::{
    kern,
    pen::ScalingPen,
    Buffer, Engine, EngineError, FontHandle, Hinting, LoadOptions,
};

/// [`Engine`] backed by skrifa.
#[derive(Copy, Clone, Debug, Default)]
pub struct SkrifaEngine;

impl Engine for SkrifaEngine {
    type Font<'a> = SkrifaFont<'a>;

    fn parse<'a>(&'a self, data: &'a [u8]) -> Result<Self::Font<'a>, EngineError> {
        SkrifaFont::new(data)
    }
}

pub struct SkrifaFont<'a> {
    num_glyphs: u32,
    units_per_em: u16,
    font: FontRef<'a>,
    charmap: Charmap<'a>,
    outlines: OutlineGlyphCollection<'a>,
}

impl<'a> SkrifaFont<'a> {
    fn new(data: &'a [u8]) -> Result<Self, EngineError> {
        let font = FontRef::new(data).map_err(EngineError::Parse)?;
        let num_glyphs = font
            .maxp()
            .map_err(|_| EngineError::MissingTable(Tag::new(b"maxp")))?
            .num_glyphs() as u32;
        let units_per_em = font
            .head()
            .map_err(|_| EngineError::MissingTable(Tag::new(b"head")))?
            .units_per_em();
        if units_per_em == 0 {
            return Err(EngineError::MissingTable(Tag::new(b"head")));
        }
        Ok(Self {
            num_glyphs,
            units_per_em,
            charmap: font.charmap(),
            outlines: font.outline_glyphs(),
            font,
        })
    }
}

impl FontHandle for SkrifaFont<'_> {
    fn num_glyphs(&self) -> u32 {
        self.num_glyphs
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn name<'b>(&self, buf: &'b mut Buffer, id: StringId) -> Result<&'b str, EngineError> {
        let name = self
            .font
            .localized_strings(id)
            .english_or_first()
            .ok_or(EngineError::NameNotFound(id))?;
        buf.text.clear();
        buf.text.extend(name.chars());
        Ok(&buf.text)
    }

    fn load_glyph<'b>(
        &self,
        buf: &'b mut Buffer,
        glyph_id: GlyphId,
        ppem: F26Dot6,
        options: LoadOptions,
    ) -> Result<&'b [PathElement], EngineError> {
        let outline = self
            .outlines
            .get(glyph_id)
            .ok_or(EngineError::GlyphNotFound(glyph_id))?;
        buf.outline.clear();
        let result = match options.hinting {
            // a size equal to the raw 26.6 value yields 26.6 coordinates
            Hinting::None => outline.draw(
                DrawSettings::unhinted(Size::new(ppem.to_bits() as f32), LocationRef::default()),
                &mut buf.outline,
            ),
            Hinting::Full => {
                let size = Size::new(ppem.to_bits() as f32 / 64.0);
                // always the bytecode interpreter, never the autohinter
                let options = HintingOptions {
                    engine: Hinter::Interpreter,
                    ..Default::default()
                };
                let hinter =
                    HintingInstance::new(&self.outlines, size, LocationRef::default(), options)
                        .map_err(|e| EngineError::Draw(glyph_id, e))?;
                outline.draw(
                    DrawSettings::hinted(&hinter, false),
                    &mut ScalingPen::new(&mut buf.outline, 64.0),
                )
            }
        };
        result.map_err(|e| EngineError::Draw(glyph_id, e))?;
        Ok(&buf.outline)
    }

    fn glyph_index(&self, _buf: &mut Buffer, codepoint: u32) -> Result<GlyphId, EngineError> {
        if !self.charmap.has_map() {
            return Err(EngineError::NoCharmap);
        }
        Ok(self.charmap.map(codepoint).unwrap_or(GlyphId::NOTDEF))
    }

    fn kern(
        &self,
        _buf: &mut Buffer,
        left: GlyphId,
        right: GlyphId,
        ppem: F26Dot6,
        hinting: Hinting,
    ) -> Result<F26Dot6, EngineError> {
        let table = self.font.kern().map_err(|e| match e {
            ReadError::TableIsMissing(tag) => EngineError::MissingTable(tag),
            e => EngineError::Kern(e),
        })?;
        let units = kern::kerning(&table, left, right).map_err(EngineError::Kern)?;
        Ok(kern::scale(units, ppem, self.units_per_em, hinting))
    }
}
