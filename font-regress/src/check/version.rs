use skrifa::string::StringId;

use crate::{
    engine::{Buffer, FontHandle},
    golden::GoldenEntry,
    report::Finding,
};

/// Compares the font's version string with the one the golden data was taken from.
///
/// Publishers update their fonts independently of us, so a different version
/// only means the golden data may be stale. The result is always advisory.
pub fn check_version(
    font: &impl FontHandle,
    buf: &mut Buffer,
    golden: &GoldenEntry,
    findings: &mut Vec<Finding>,
) {
    match font.name(buf, StringId::VERSION_STRING) {
        Ok(got) if got == golden.version => (),
        Ok(got) => {
            log::warn!(
                "font version {got:?} differs from the golden data version {:?}",
                golden.version
            );
            findings.push(Finding::VersionDrift {
                got: got.to_owned(),
                want: golden.version.clone(),
            });
        }
        Err(error) => {
            log::warn!("unable to read font version: {error}");
            findings.push(Finding::VersionUnavailable(error));
        }
    }
}
