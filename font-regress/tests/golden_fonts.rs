//! Checks the engine against every font with golden data.
//!
//! These tests need fonts that cannot be checked in. They are ignored unless
//! FONT_REGRESS_PROPRIETARY=1 is set; the font directories are configured
//! with FONT_REGRESS_ADOBE_DIR and FONT_REGRESS_MICROSOFT_DIR. Pass
//! `--include-ignored` to run them anyway and see the setup errors.

use std::sync::Arc;

use font_regress::{DatasetRegistry, Harness, HarnessConfig, SkrifaEngine, Status};
use libtest_mimic::{Arguments, Failed, Trial};

fn main() {
    let _ = env_logger::builder().is_test(true).try_init();
    let args = Arguments::from_args();

    let mut config = HarnessConfig::from_env().expect("invalid harness configuration");
    let ignored = !config.enabled;
    // ignored trials still run under --include-ignored
    config.enabled = true;
    let registry = DatasetRegistry::builtin().expect("built in golden data should load");
    let harness = Arc::new(Harness::new(config, registry, SkrifaEngine));

    let trials = harness
        .registry()
        .iter()
        .map(|(id, _)| {
            let harness = harness.clone();
            let id = id.clone();
            Trial::test(format!("proprietary::{id}"), move || {
                let report = harness.check_font(&id);
                for advisory in report.advisories() {
                    log::warn!("{id}: {advisory}");
                }
                match report.status() {
                    Status::Failed => Err(Failed::from(report.to_string())),
                    Status::Passed | Status::Skipped => Ok(()),
                }
            })
            .with_ignored_flag(ignored)
        })
        .collect();

    libtest_mimic::run(&args, trials).exit();
}
