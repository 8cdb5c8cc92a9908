//! Font publishers and the ids of the fonts we hold golden data for.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::golden::GoldenError;

/// The publisher of a font that is not included in this repository.
///
/// Each provider has its own base directory, see [`HarnessConfig`](crate::HarnessConfig).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Adobe,
    Microsoft,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Adobe, Provider::Microsoft];

    pub fn name(self) -> &'static str {
        match self {
            Provider::Adobe => "adobe",
            Provider::Microsoft => "microsoft",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GoldenError::InvalidId(s.to_owned()))
    }
}

/// Identifies one physical font file and the golden data taken from it.
///
/// Written as `provider/filename`, for example `microsoft/Arial.ttf`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedFontId {
    provider: Provider,
    filename: String,
}

impl QualifiedFontId {
    pub fn new(provider: Provider, filename: impl Into<String>) -> Self {
        Self {
            provider,
            filename: filename.into(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl fmt::Display for QualifiedFontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.filename)
    }
}

impl FromStr for QualifiedFontId {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, filename) = s
            .split_once('/')
            .ok_or_else(|| GoldenError::InvalidId(s.to_owned()))?;
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(GoldenError::InvalidId(s.to_owned()));
        }
        let provider = provider
            .parse()
            .map_err(|_| GoldenError::InvalidId(s.to_owned()))?;
        Ok(Self::new(provider, filename))
    }
}
