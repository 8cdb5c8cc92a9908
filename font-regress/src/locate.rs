//! Finding font files on disk.

use std::path::PathBuf;

use crate::{
    config::{DirSetting, HarnessConfig},
    Provider, QualifiedFontId,
};

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("{id}: no directory is configured for {provider} fonts\nPerhaps you need to set {setting}?")]
    Unconfigured {
        id: QualifiedFontId,
        provider: Provider,
        setting: DirSetting,
    },
    #[error("{}: {source}\nPerhaps you need to set {setting}? It is currently {:?}", path.display(), dir.display())]
    Unavailable {
        path: PathBuf,
        dir: PathBuf,
        setting: DirSetting,
        source: std::io::Error,
    },
}

/// Reads font files from the configured provider directories.
///
/// Nothing is cached; every call goes back to the file system.
#[derive(Clone, Debug, Default)]
pub struct FontLocator {
    adobe_dir: Option<PathBuf>,
    microsoft_dir: Option<PathBuf>,
}

impl FontLocator {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            adobe_dir: config.adobe_dir.clone(),
            microsoft_dir: config.microsoft_dir.clone(),
        }
    }

    /// The path `id` would be read from, if its provider has a directory.
    pub fn path(&self, id: &QualifiedFontId) -> Option<PathBuf> {
        let dir = match id.provider() {
            Provider::Adobe => self.adobe_dir.as_ref(),
            Provider::Microsoft => self.microsoft_dir.as_ref(),
        };
        dir.map(|dir| dir.join(id.filename()))
    }

    pub fn resolve(&self, id: &QualifiedFontId) -> Result<Vec<u8>, LocateError> {
        let setting = DirSetting::for_provider(id.provider());
        let path = self.path(id).ok_or_else(|| LocateError::Unconfigured {
            id: id.clone(),
            provider: id.provider(),
            setting,
        })?;
        std::fs::read(&path).map_err(|source| LocateError::Unavailable {
            dir: path.parent().map(Into::into).unwrap_or_default(),
            path,
            setting,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> QualifiedFontId {
        s.parse().unwrap()
    }

    #[test]
    fn read_from_provider_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Arial.ttf"), b"arial bytes").unwrap();
        let config = HarnessConfig::default().with_dir(Provider::Microsoft, dir.path());
        let locator = FontLocator::new(&config);
        assert_eq!(
            locator.resolve(&id("microsoft/Arial.ttf")).unwrap(),
            b"arial bytes"
        );
    }

    #[test]
    fn rereads_every_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Arial.ttf");
        let config = HarnessConfig::default().with_dir(Provider::Microsoft, dir.path());
        let locator = FontLocator::new(&config);
        std::fs::write(&path, b"one").unwrap();
        assert_eq!(locator.resolve(&id("microsoft/Arial.ttf")).unwrap(), b"one");
        std::fs::write(&path, b"two").unwrap();
        assert_eq!(locator.resolve(&id("microsoft/Arial.ttf")).unwrap(), b"two");
    }

    #[test]
    fn missing_file_names_the_setting() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_dir(Provider::Adobe, dir.path());
        let err = FontLocator::new(&config)
            .resolve(&id("adobe/SourceCodePro-Regular.otf"))
            .unwrap_err();
        assert!(matches!(err, LocateError::Unavailable { .. }));
        let message = err.to_string();
        assert!(message.contains("SourceCodePro-Regular.otf"), "{message}");
        assert!(message.contains("--adobe-dir (or FONT_REGRESS_ADOBE_DIR)"), "{message}");
    }

    #[test]
    fn unset_dir_names_the_setting() {
        let err = FontLocator::new(&HarnessConfig::default())
            .resolve(&id("adobe/SourceSansPro-Regular.otf"))
            .unwrap_err();
        assert!(matches!(err, LocateError::Unconfigured { .. }));
        assert!(err.to_string().contains("FONT_REGRESS_ADOBE_DIR"));
    }
}
