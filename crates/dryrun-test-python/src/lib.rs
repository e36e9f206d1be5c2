use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use pep440_rs::Version;
use which::which;

/// Oldest interpreter the dryrun project supports.
pub const MINIMUM_PYTHON: &str = "3.9";

/// Prints `major.minor.micro` of the running interpreter.
pub const VERSION_SCRIPT: &str =
    "import sys; print('.'.join(str(part) for part in sys.version_info[:3]))";

const CANDIDATES: [&str; 2] = ["python3", "python"];

/// Detects the interpreter used for the test run.
///
/// An explicit, non-empty override wins; otherwise the first of `python3` and
/// `python` found on `PATH` is used.
///
/// # Errors
///
/// Returns an error when no interpreter can be found or the detected path is
/// not valid UTF-8.
pub fn detect_interpreter(explicit: Option<&str>) -> Result<String> {
    if let Some(explicit) = explicit.filter(|value| !value.trim().is_empty()) {
        tracing::debug!(python = explicit, "using explicit interpreter");
        return Ok(explicit.to_string());
    }

    for candidate in CANDIDATES {
        if let Ok(path) = which(candidate) {
            return path_to_string(path);
        }
    }

    bail!("no python interpreter found; set DRYRUN_TEST_PYTHON")
}

fn path_to_string(path: PathBuf) -> Result<String> {
    path.into_os_string()
        .into_string()
        .map_err(|_| anyhow!("non-utf8 path"))
}

/// Parses the output of [`VERSION_SCRIPT`] (or `python --version`).
///
/// # Errors
///
/// Returns an error when the text does not contain a PEP 440 version.
pub fn parse_version(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let candidate = trimmed
        .strip_prefix("Python")
        .map_or(trimmed, str::trim_start);
    if candidate.is_empty() {
        bail!("interpreter reported an empty version");
    }
    Version::from_str(candidate)
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("invalid interpreter version `{candidate}`"))
}

/// The minimum supported version as a parsed [`Version`].
///
/// # Errors
///
/// Returns an error only if [`MINIMUM_PYTHON`] itself is malformed.
pub fn minimum_version() -> Result<Version> {
    parse_version(MINIMUM_PYTHON)
}

/// Numeric PEP 440 ordering, so `3.10` is newer than `3.9`.
#[must_use]
pub fn meets_minimum(version: &Version, minimum: &Version) -> bool {
    version >= minimum
}
