use std::fmt;

use serde::Serialize;

pub const USAGE: &str = concat!(
    "dryrun-test ",
    env!("CARGO_PKG_VERSION"),
    " – test runner for mcp-bigquery-dryrun\n\n",
    "Usage:\n",
    "    dryrun-test [--quick | --release | --import | --coverage | --help]\n\n",
    "Modes:\n",
    "  (none)       Full test suite; credential-requiring tests are skipped without credentials.\n",
    "  --quick      Unit tests that need no credentials (TestWithoutCredentials).\n",
    "  --release    Release test suite (run_release_tests.py; --skip-integration without credentials).\n",
    "  --import     Import tests only (tests/test_imports.py).\n",
    "  --coverage   Full test suite under coverage; prints a report and writes htmlcov/.\n",
    "  --help       Show this help.\n\n",
    "Credentials are detected from GOOGLE_APPLICATION_CREDENTIALS,\n",
    "~/.config/gcloud/application_default_credentials.json, or GOOGLE_CLOUD_PROJECT.\n\n",
    "Environment:\n",
    "  DRYRUN_TEST_PYTHON   Interpreter to check and to run the release suite with.\n",
    "  DRYRUN_TEST_LOG      Log level for dryrun-test itself (warn, info, debug, trace).\n",
    "  DRYRUN_TEST_JSON=1   Emit a JSON summary instead of styled output.\n",
    "  NO_COLOR             Disable colored output.\n",
);

/// One of the mutually exclusive test modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Quick,
    Release,
    Import,
    Coverage,
    Default,
    Help,
}

impl Mode {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Mode::Quick => "quick",
            Mode::Release => "release",
            Mode::Import => "import",
            Mode::Coverage => "coverage",
            Mode::Default => "default",
            Mode::Help => "help",
        }
    }

    /// Headline printed before the delegated command starts.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Mode::Quick => "Running quick tests (no credentials required)",
            Mode::Release => "Running release test suite",
            Mode::Import => "Running import tests",
            Mode::Coverage => "Running tests with coverage",
            Mode::Default => "Running full test suite",
            Mode::Help => "Showing usage",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
