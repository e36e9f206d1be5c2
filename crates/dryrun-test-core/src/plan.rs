//! Which external commands each mode runs.

use std::fmt;

use serde::Serialize;

use crate::mode::Mode;

pub const TESTS_DIR: &str = "tests/";
pub const QUICK_SELECTOR: &str = "tests/test_min.py::TestWithoutCredentials";
pub const IMPORT_SELECTOR: &str = "tests/test_imports.py";
pub const CREDENTIALS_MARKER: &str = "requires_credentials";
pub const RELEASE_SCRIPT: &str = "run_release_tests.py";
pub const SKIP_INTEGRATION_FLAG: &str = "--skip-integration";
pub const COVERAGE_HTML_DIR: &str = "htmlcov";

/// One delegated command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Resolved executables the plan refers to.
#[derive(Clone, Copy, Debug)]
pub struct PlanTools<'a> {
    pub python: &'a str,
    pub pytest: &'a str,
    /// Only resolved for coverage mode.
    pub coverage: Option<&'a str>,
}

/// Ordered commands for `mode`. Help runs nothing; coverage without a
/// resolved coverage executable runs nothing either.
#[must_use]
pub fn plan_for(mode: Mode, tools: &PlanTools<'_>, has_credentials: bool) -> Vec<Invocation> {
    match mode {
        Mode::Quick => vec![Invocation::new(tools.pytest, &[QUICK_SELECTOR, "-v"])],
        Mode::Import => vec![Invocation::new(tools.pytest, &[IMPORT_SELECTOR, "-v"])],
        Mode::Release => {
            let mut args = vec![RELEASE_SCRIPT];
            if !has_credentials {
                args.push(SKIP_INTEGRATION_FLAG);
            }
            vec![Invocation::new(tools.python, &args)]
        }
        Mode::Default => {
            if has_credentials {
                vec![Invocation::new(tools.pytest, &[TESTS_DIR, "-v"])]
            } else {
                let exclude = format!("not {CREDENTIALS_MARKER}");
                vec![Invocation::new(tools.pytest, &[TESTS_DIR, "-v", "-m", exclude.as_str()])]
            }
        }
        Mode::Coverage => match tools.coverage {
            Some(coverage) => vec![
                Invocation::new(coverage, &["run", "-m", "pytest", TESTS_DIR, "-v"]),
                Invocation::new(coverage, &["report", "-m"]),
                Invocation::new(coverage, &["html", "-d", COVERAGE_HTML_DIR]),
            ],
            None => Vec::new(),
        },
        Mode::Help => Vec::new(),
    }
}
