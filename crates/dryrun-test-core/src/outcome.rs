use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: CommandStatus,
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ExecutionOutcome {
    pub fn success(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: message.into(),
            details,
        }
    }

    pub fn failure(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Failure,
            message: message.into(),
            details,
        }
    }

    pub fn user_error(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::UserError,
            message: message.into(),
            details,
        }
    }

    /// Process exit status for this outcome.
    ///
    /// Failures forward the delegated command's `code` unchanged; anything
    /// that is not a positive code (spawn errors, signals) maps to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.status {
            CommandStatus::Ok => 0,
            CommandStatus::UserError => 1,
            CommandStatus::Failure => self
                .details
                .get("code")
                .and_then(Value::as_i64)
                .and_then(|code| i32::try_from(code).ok())
                .filter(|code| *code > 0)
                .unwrap_or(1),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.details.get("hint").and_then(Value::as_str)
    }

    /// Outcomes whose message is printed verbatim (usage text).
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.details
            .get("passthrough")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn to_json_response(&self) -> Value {
        let status = match self.status {
            CommandStatus::Ok => "ok",
            CommandStatus::UserError => "user-error",
            CommandStatus::Failure => "error",
        };
        let details = match &self.details {
            Value::Object(_) => self.details.clone(),
            Value::Null => json!({}),
            other => json!({ "value": other }),
        };
        json!({
            "status": status,
            "message": self.message,
            "exit_code": self.exit_code(),
            "details": details,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    UserError,
    Failure,
}

pub const HELP_HINT: &str = "Run `dryrun-test --help` to list the available modes.";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized option `{0}`")]
    Unrecognized(String),
    #[error("expected at most one option, got {0}")]
    TooManyArguments(usize),
}

impl ConfigError {
    #[must_use]
    pub fn into_outcome(self) -> ExecutionOutcome {
        let details = match &self {
            ConfigError::Unrecognized(value) => json!({
                "reason": "unrecognized_option",
                "option": value,
                "hint": HELP_HINT,
            }),
            ConfigError::TooManyArguments(count) => json!({
                "reason": "too_many_arguments",
                "count": count,
                "hint": HELP_HINT,
            }),
        };
        ExecutionOutcome::user_error(self.to_string(), details)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PreflightError {
    #[error("python interpreter not found: {0}")]
    PythonMissing(String),
    #[error("python {found} is too old; {minimum} or newer is required")]
    PythonTooOld { found: String, minimum: String },
    #[error("could not determine the python version of {python}: {reason}")]
    VersionProbe { python: String, reason: String },
    #[error("pytest is not installed")]
    PytestMissing,
    #[error("coverage is not installed")]
    CoverageMissing,
}

impl PreflightError {
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            PreflightError::PythonMissing(_) | PreflightError::VersionProbe { .. } => {
                "Install Python 3.9+ or point DRYRUN_TEST_PYTHON at a working interpreter."
            }
            PreflightError::PythonTooOld { .. } => {
                "Upgrade to Python 3.9+ or point DRYRUN_TEST_PYTHON at a newer interpreter."
            }
            PreflightError::PytestMissing => "Install it with `pip install pytest`.",
            PreflightError::CoverageMissing => "Install it with `pip install coverage`.",
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            PreflightError::PythonMissing(_) => "missing_python",
            PreflightError::PythonTooOld { .. } => "python_too_old",
            PreflightError::VersionProbe { .. } => "python_version_probe",
            PreflightError::PytestMissing => "missing_pytest",
            PreflightError::CoverageMissing => "missing_coverage",
        }
    }

    #[must_use]
    pub fn into_outcome(self) -> ExecutionOutcome {
        let details = json!({
            "reason": self.reason(),
            "hint": self.hint(),
        });
        ExecutionOutcome::user_error(self.to_string(), details)
    }
}
