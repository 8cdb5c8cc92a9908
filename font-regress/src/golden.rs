//! Golden data: facts about real fonts that the engine must reproduce.
//!
//! The built in data set is embedded from `data/golden.toml` and parsed once
//! into a [`DatasetRegistry`]. A registry is never modified after it has been
//! built.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::IndexMap;
use serde::Deserialize;
use skrifa::raw::types::F26Dot6;

use crate::{engine::Hinting, provider::Provider, QualifiedFontId};

static BUILTIN_GOLDEN: &str = include_str!("../data/golden.toml");

static EMPTY_ENTRY: GoldenEntry = GoldenEntry {
    version: String::new(),
    min_glyph_count: 0,
    first_unsupported_glyph: None,
    glyph_index: BTreeMap::new(),
    kern: Vec::new(),
};

#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    #[error("Unable to read golden data from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed golden data: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid codepoint '{0}', expected a value like U+0041")]
    InvalidCodepoint(String),
    #[error("Invalid font id '{0}', expected provider/filename")]
    InvalidId(String),
    #[error("Font {0} has more than one golden entry")]
    Duplicate(QualifiedFontId),
    #[error("Font {0} must have a min_glyph_count greater than zero")]
    ZeroMinimum(QualifiedFontId),
    #[error("Font {id} has more than one glyph_index sample for {codepoint}")]
    DuplicateCodepoint {
        id: QualifiedFontId,
        codepoint: Codepoint,
    },
}

/// A Unicode scalar value as written in golden data (`U+0041`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codepoint(u32);

impl Codepoint {
    pub const MAX: u32 = 0x10FFFF;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<char> for Codepoint {
    fn from(value: char) -> Self {
        Self(value as u32)
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

impl FromStr for Codepoint {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GoldenError::InvalidCodepoint(s.to_owned());
        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .ok_or_else(invalid)?;
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        if value > Self::MAX {
            return Err(invalid());
        }
        Ok(Self(value))
    }
}

/// One kerning sample.
///
/// Kerning is directional: `(A, V)` and `(V, A)` are separate cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernCase {
    /// Pixels per em, in 26.6 fixed point.
    pub ppem: F26Dot6,
    pub hinting: Hinting,
    pub pair: [Codepoint; 2],
    /// Expected adjustment, in 26.6 fixed point units.
    pub want: i32,
}

/// Everything we know about one font.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoldenEntry {
    /// The name table version string the samples were taken from.
    pub version: String,
    pub min_glyph_count: u32,
    /// If set, glyphs at or above this index are not expected to load yet.
    pub first_unsupported_glyph: Option<u32>,
    pub glyph_index: BTreeMap<Codepoint, u32>,
    pub kern: Vec<KernCase>,
}

/// Immutable map from qualified font id to golden data.
///
/// Iteration follows the order in which entries were declared.
#[derive(Clone, Debug, Default)]
pub struct DatasetRegistry {
    entries: IndexMap<QualifiedFontId, GoldenEntry>,
}

impl DatasetRegistry {
    /// The golden data shipped with this crate.
    pub fn builtin() -> Result<Self, GoldenError> {
        Self::from_toml(BUILTIN_GOLDEN)
    }

    /// Loads golden data from a TOML file with the same layout as the built in set.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GoldenError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GoldenError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, GoldenError> {
        let file: GoldenFile = toml::from_str(text)?;
        let mut entries = IndexMap::with_capacity(file.font.len());
        for raw in file.font {
            let (id, entry) = raw.into_entry()?;
            if entry.min_glyph_count == 0 {
                return Err(GoldenError::ZeroMinimum(id));
            }
            if entries.contains_key(&id) {
                return Err(GoldenError::Duplicate(id));
            }
            entries.insert(id, entry);
        }
        Ok(Self { entries })
    }

    /// Returns the golden data for `id`, or an empty entry that checks nothing.
    pub fn lookup(&self, id: &QualifiedFontId) -> &GoldenEntry {
        self.get(id).unwrap_or(&EMPTY_ENTRY)
    }

    pub fn get(&self, id: &QualifiedFontId) -> Option<&GoldenEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &QualifiedFontId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedFontId, &GoldenEntry)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GoldenFile {
    #[serde(default)]
    font: Vec<RawEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    provider: Provider,
    filename: String,
    #[serde(default)]
    version: String,
    min_glyph_count: u32,
    first_unsupported_glyph: Option<u32>,
    #[serde(default)]
    glyph_index: BTreeMap<String, u32>,
    #[serde(default)]
    kern: Vec<RawKernCase>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawKernCase {
    ppem: i32,
    hinting: Hinting,
    pair: [String; 2],
    want: i32,
}

impl RawEntry {
    fn into_entry(self) -> Result<(QualifiedFontId, GoldenEntry), GoldenError> {
        let id = QualifiedFontId::new(self.provider, self.filename);
        // keys are unique as written, but "U+41" and "U+0041" are the same codepoint
        let mut glyph_index = BTreeMap::new();
        for (codepoint, gid) in self.glyph_index {
            let codepoint: Codepoint = codepoint.parse()?;
            if glyph_index.insert(codepoint, gid).is_some() {
                return Err(GoldenError::DuplicateCodepoint { id, codepoint });
            }
        }
        let kern = self
            .kern
            .into_iter()
            .map(|case| {
                let [left, right] = case.pair;
                Ok(KernCase {
                    ppem: F26Dot6::from_bits(case.ppem),
                    hinting: case.hinting,
                    pair: [left.parse()?, right.parse()?],
                    want: case.want,
                })
            })
            .collect::<Result<_, GoldenError>>()?;
        let entry = GoldenEntry {
            version: self.version,
            min_glyph_count: self.min_glyph_count,
            first_unsupported_glyph: self.first_unsupported_glyph,
            glyph_index,
            kern,
        };
        Ok((id, entry))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn id(s: &str) -> QualifiedFontId {
        s.parse().unwrap()
    }

    #[test]
    fn builtin_registry_parses() {
        let registry = DatasetRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 9);
        assert!(registry
            .iter()
            .all(|(_, entry)| entry.min_glyph_count > 0 && !entry.version.is_empty()));
        // declaration order is kept
        let first = registry.iter().next().unwrap().0;
        assert_eq!(first, &id("adobe/SourceCodePro-Regular.otf"));
    }

    #[test]
    fn arial_samples() {
        let registry = DatasetRegistry::builtin().unwrap();
        let arial = registry.get(&id("microsoft/Arial.ttf")).unwrap();
        assert_eq!(arial.version, "Version 2.82");
        assert_eq!(arial.first_unsupported_glyph, Some(98));
        assert_eq!(arial.glyph_index.get(&Codepoint::from('A')), Some(&36));
        assert_eq!(
            arial.kern[0],
            KernCase {
                ppem: F26Dot6::from_bits(2048),
                hinting: Hinting::None,
                pair: ['A'.into(), 'V'.into()],
                want: -152,
            }
        );
    }

    #[test]
    fn kerning_is_directional() {
        let registry = DatasetRegistry::builtin().unwrap();
        let arial = registry.lookup(&id("microsoft/Arial.ttf"));
        let theta_lamda = [Codepoint::new(0x03B8), Codepoint::new(0x03BB)];
        let lamda_theta = [Codepoint::new(0x03BB), Codepoint::new(0x03B8)];
        let want = |pair: [Codepoint; 2]| {
            arial
                .kern
                .iter()
                .find(|case| case.pair == pair)
                .unwrap()
                .want
        };
        assert_eq!(want(theta_lamda), -39);
        assert_eq!(want(lamda_theta), 0);
    }

    #[test]
    fn hinting_changes_times_new_roman_kerning() {
        let registry = DatasetRegistry::builtin().unwrap();
        let tnr = registry.lookup(&id("microsoft/Times_New_Roman.ttf"));
        let av = [Codepoint::from('A'), Codepoint::from('V')];
        let at_768: Vec<_> = tnr
            .kern
            .iter()
            .filter(|case| case.pair == av && case.ppem == F26Dot6::from_bits(768))
            .map(|case| (case.hinting, case.want))
            .collect();
        assert_eq!(at_768, [(Hinting::None, -99), (Hinting::Full, -128)]);
        assert_eq!(tnr.glyph_index.get(&Codepoint::new(0xF041)), Some(&0));
        assert_eq!(tnr.glyph_index.get(&Codepoint::new(0xF042)), Some(&0));
    }

    #[test]
    fn webdings_remaps_latin() {
        let registry = DatasetRegistry::builtin().unwrap();
        let webdings = registry.lookup(&id("microsoft/Webdings.ttf"));
        assert_eq!(webdings.first_unsupported_glyph, None);
        assert_eq!(webdings.glyph_index.get(&Codepoint::new(0xF041)), Some(&36));
        assert_eq!(webdings.glyph_index.get(&Codepoint::from('A')), Some(&0));
    }

    #[test]
    fn unregistered_font_checks_nothing() {
        let registry = DatasetRegistry::builtin().unwrap();
        let missing = id("microsoft/Wingdings.ttf");
        assert!(!registry.contains(&missing));
        assert_eq!(registry.lookup(&missing), &GoldenEntry::default());
    }

    #[test]
    fn reject_duplicates() {
        let text = r#"
            [[font]]
            provider = "adobe"
            filename = "A.otf"
            min_glyph_count = 1

            [[font]]
            provider = "adobe"
            filename = "A.otf"
            min_glyph_count = 2
        "#;
        assert!(matches!(
            DatasetRegistry::from_toml(text),
            Err(GoldenError::Duplicate(dupe)) if dupe == id("adobe/A.otf")
        ));
    }

    #[test]
    fn reject_codepoints_written_twice() {
        let text = r#"
            [[font]]
            provider = "microsoft"
            filename = "Arial.ttf"
            min_glyph_count = 1
            glyph_index = { "U+0041" = 36, "U+41" = 37 }
        "#;
        let err = DatasetRegistry::from_toml(text).unwrap_err();
        assert!(matches!(
            &err,
            GoldenError::DuplicateCodepoint { id: dupe, codepoint }
                if *dupe == id("microsoft/Arial.ttf") && codepoint.to_u32() == 0x41
        ));
        assert_eq!(
            err.to_string(),
            "Font microsoft/Arial.ttf has more than one glyph_index sample for U+0041"
        );
    }

    #[test]
    fn reject_zero_minimum() {
        let text = r#"
            [[font]]
            provider = "microsoft"
            filename = "B.ttf"
            min_glyph_count = 0
        "#;
        assert!(matches!(
            DatasetRegistry::from_toml(text),
            Err(GoldenError::ZeroMinimum(_))
        ));
    }

    #[test]
    fn reject_bad_codepoints() {
        for bad in ["0041", "U+", "U+ZZ", "U+110000"] {
            assert!(bad.parse::<Codepoint>().is_err(), "{bad}");
        }
        let text = r#"
            [[font]]
            provider = "microsoft"
            filename = "B.ttf"
            min_glyph_count = 1
            glyph_index = { "A" = 36 }
        "#;
        assert!(matches!(
            DatasetRegistry::from_toml(text),
            Err(GoldenError::InvalidCodepoint(cp)) if cp == "A"
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden.toml");
        std::fs::write(
            &path,
            "[[font]]\nprovider = \"adobe\"\nfilename = \"C.otf\"\nmin_glyph_count = 3\n",
        )
        .unwrap();
        let registry = DatasetRegistry::load(&path).unwrap();
        assert_eq!(registry.lookup(&id("adobe/C.otf")).min_glyph_count, 3);

        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            DatasetRegistry::load(missing),
            Err(GoldenError::Io { .. })
        ));
    }
}
