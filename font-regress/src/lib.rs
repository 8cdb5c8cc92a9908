//! Regression checks for a font engine against golden data taken from
//! fonts we are not allowed to redistribute.
//!
//! Golden data (expected glyph counts, glyph indices and kerning values) is
//! shipped with the crate in `data/golden.toml`. The fonts themselves are
//! read from directories configured by the user, and checking is disabled
//! until explicitly enabled; see [`HarnessConfig`].
//!
//! ```no_run
//! use font_regress::{DatasetRegistry, Harness, HarnessConfig, SkrifaEngine};
//!
//! let config = HarnessConfig::from_env().unwrap();
//! let harness = Harness::new(config, DatasetRegistry::builtin().unwrap(), SkrifaEngine);
//! for report in harness.run(&[]) {
//!     print!("{report}");
//! }
//! ```

pub mod check;
pub mod config;
pub mod engine;
pub mod golden;
mod harness;
pub mod locate;
mod provider;
pub mod report;

pub use config::{ConfigError, HarnessConfig};
pub use engine::{Engine, EngineError, FontHandle, Hinting, SkrifaEngine};
pub use golden::{DatasetRegistry, GoldenEntry, GoldenError};
pub use harness::Harness;
pub use provider::{Provider, QualifiedFontId};
pub use report::{FatalError, Finding, FontReport, Status};
