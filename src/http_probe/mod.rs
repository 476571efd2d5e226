pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::{ProbeSettings, build_client, probe_url};
    pub use super::result::{CheckResult, Outcome, ProbeOutcome};
}

use std::fmt::Write;

/// Renders an error together with its chain of sources on one line.
pub(crate) fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
