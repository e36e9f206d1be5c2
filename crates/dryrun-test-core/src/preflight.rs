use std::path::PathBuf;

use dryrun_test_python::{meets_minimum, minimum_version, parse_version, VERSION_SCRIPT};
use pep440_rs::Version;
use serde_json::{json, Value};

use crate::context::CommandContext;
use crate::credentials::{detect_credentials, CredentialSource};
use crate::outcome::{ExecutionOutcome, PreflightError};

pub const PYTEST: &str = "pytest";
const PROJECT_MARKER: &str = "pyproject.toml";

/// Facts gathered before dispatch. Built once and never mutated.
#[derive(Clone, Debug)]
pub struct Preflight {
    pub python: String,
    pub python_version: Version,
    pub pytest: PathBuf,
    pub credentials: Option<CredentialSource>,
    pub project_root: PathBuf,
}

impl Preflight {
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "python": self.python,
            "python_version": self.python_version.to_string(),
            "pytest": self.pytest.display().to_string(),
            "credentials": self.credentials.as_ref().map(CredentialSource::to_json),
            "project_root": self.project_root.display().to_string(),
        })
    }
}

/// Checks the interpreter version, the test runner and the credentials
/// signal, in that order. Environment errors stop at the first failure.
///
/// # Errors
///
/// Returns a user-error outcome when the interpreter is missing or too old,
/// or pytest is not on the search path.
pub fn run_preflight(ctx: &CommandContext) -> Result<Preflight, ExecutionOutcome> {
    let reporter = ctx.reporter();

    reporter.info("Checking Python version...");
    let (python, python_version) = check_python(ctx).map_err(PreflightError::into_outcome)?;
    reporter.success(&format!("Python {python_version} ({python})"));

    reporter.info("Checking for pytest...");
    let pytest = ctx
        .tools()
        .locate(PYTEST)
        .ok_or(PreflightError::PytestMissing)
        .map_err(PreflightError::into_outcome)?;
    reporter.success(&format!("pytest found at {}", pytest.display()));

    let credentials = detect_credentials(ctx.env(), ctx.home_dir().as_deref(), ctx.fs());
    match &credentials {
        Some(source) => {
            reporter.success(&format!("BigQuery credentials: {}", source.describe()));
        }
        None => reporter.warning(
            "No BigQuery credentials found; tests that require credentials will be skipped",
        ),
    }

    let project_root = resolve_project_root(ctx);
    tracing::debug!(
        python = %python,
        version = %python_version,
        pytest = %pytest.display(),
        credentials = credentials.is_some(),
        root = %project_root.display(),
        "preflight complete"
    );

    Ok(Preflight {
        python,
        python_version,
        pytest,
        credentials,
        project_root,
    })
}

fn check_python(ctx: &CommandContext) -> Result<(String, Version), PreflightError> {
    let python = ctx
        .tools()
        .detect_interpreter(ctx.config().python().explicit.as_deref())
        .map_err(|err| PreflightError::PythonMissing(err.to_string()))?;
    let probe_error = |reason: String| PreflightError::VersionProbe {
        python: python.clone(),
        reason,
    };

    let cwd = ctx.fs().current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let args = vec!["-c".to_string(), VERSION_SCRIPT.to_string()];
    let output = ctx
        .runner()
        .run_command(&python, &args, &cwd)
        .map_err(|err| probe_error(format!("{err:#}")))?;
    if output.code != 0 {
        return Err(probe_error(format!(
            "exit {}: {}",
            output.code,
            output.stderr.trim()
        )));
    }
    let version = parse_version(&output.stdout).map_err(|err| probe_error(format!("{err:#}")))?;
    let minimum = minimum_version().map_err(|err| probe_error(format!("{err:#}")))?;
    if !meets_minimum(&version, &minimum) {
        return Err(PreflightError::PythonTooOld {
            found: version.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok((python, version))
}

/// Nearest ancestor of the working directory holding `pyproject.toml`,
/// falling back to the working directory itself.
fn resolve_project_root(ctx: &CommandContext) -> PathBuf {
    let cwd = ctx.fs().current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(root) = cwd
        .ancestors()
        .find(|dir| ctx.fs().is_file(&dir.join(PROJECT_MARKER)))
    {
        return root.to_path_buf();
    }
    ctx.reporter().warning(&format!(
        "No {PROJECT_MARKER} found above {}; running from there anyway",
        cwd.display()
    ));
    cwd
}
