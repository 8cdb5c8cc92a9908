//! Harness configuration.
//!
//! The fonts we check cannot be distributed with this crate, so checks are
//! off unless explicitly enabled, and each provider's fonts are read from a
//! configurable directory.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use crate::Provider;

/// Environment variable that enables checking.
pub const ENABLE_VAR: &str = "FONT_REGRESS_PROPRIETARY";

/// Command line flag that enables checking.
pub const ENABLE_FLAG: &str = "--proprietary";

/// Where the Debian `ttf-mscorefonts-installer` package puts its fonts.
pub const DEFAULT_MICROSOFT_DIR: &str = "/usr/share/fonts/truetype/msttcorefonts";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}, expected one of 1, 0, true, false, yes, no, on, off")]
    InvalidBool { var: &'static str, value: String },
}

/// The settings that control where a provider's fonts are found.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DirSetting {
    pub flag: &'static str,
    pub env: &'static str,
}

impl DirSetting {
    pub fn for_provider(provider: Provider) -> Self {
        match provider {
            Provider::Adobe => DirSetting {
                flag: "--adobe-dir",
                env: "FONT_REGRESS_ADOBE_DIR",
            },
            Provider::Microsoft => DirSetting {
                flag: "--microsoft-dir",
                env: "FONT_REGRESS_MICROSOFT_DIR",
            },
        }
    }
}

impl fmt::Display for DirSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (or {})", self.flag, self.env)
    }
}

/// Everything the harness needs to know about its environment.
///
/// Built once and handed to [`Harness::new`](crate::Harness::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Fonts are only checked when this is set.
    pub enabled: bool,
    pub adobe_dir: Option<PathBuf>,
    pub microsoft_dir: Option<PathBuf>,
    /// Check fonts concurrently.
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // There is no standard location for these, see
            // <https://bugs.debian.org/cgi-bin/bugreport.cgi?bug=736680>
            adobe_dir: None,
            microsoft_dir: Some(DEFAULT_MICROSOFT_DIR.into()),
            parallel: false,
        }
    }
}

impl HarnessConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var_os(var))
    }

    /// Builds a configuration from the defaults, overridden by whatever
    /// `lookup` returns for our environment variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self, ConfigError> {
        let lookup = |var: &str| lookup(var).filter(|value| !value.is_empty());
        let mut config = Self::default();
        if let Some(value) = lookup(ENABLE_VAR) {
            config.enabled = parse_bool(ENABLE_VAR, &value.to_string_lossy())?;
        }
        for provider in Provider::ALL {
            if let Some(dir) = lookup(DirSetting::for_provider(provider).env) {
                config.set_dir(provider, dir.into());
            }
        }
        Ok(config)
    }

    pub fn dir(&self, provider: Provider) -> Option<&Path> {
        match provider {
            Provider::Adobe => self.adobe_dir.as_deref(),
            Provider::Microsoft => self.microsoft_dir.as_deref(),
        }
    }

    pub fn set_dir(&mut self, provider: Provider, dir: PathBuf) {
        match provider {
            Provider::Adobe => self.adobe_dir = Some(dir),
            Provider::Microsoft => self.microsoft_dir = Some(dir),
        }
    }

    pub fn with_dir(mut self, provider: Provider, dir: impl Into<PathBuf>) -> Self {
        self.set_dir(provider, dir.into());
        self
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_owned(),
        }),
    }
}
