//! Test-mode dispatcher for the mcp-bigquery-dryrun project.
//!
//! A run is linear: the caller picks a [`Mode`], [`execute`] performs the
//! environment preflight, builds the invocation plan for that mode and hands
//! each command to the [`CommandRunner`]. The resulting [`ExecutionOutcome`]
//! carries the delegated command's exit status.

mod config;
mod context;
mod credentials;
mod dispatch;
mod effects;
mod mode;
mod outcome;
mod plan;
mod preflight;
mod process;
mod report;

#[cfg(test)]
mod testing;

pub use crate::config::{
    Config, EnvSnapshot, LogConfig, OutputConfig, PythonConfig, CREDENTIALS_ENV, JSON_ENV,
    LOG_ENV, NO_COLOR_ENV, PROJECT_ENV, PYTHON_ENV,
};
pub use crate::context::CommandContext;
pub use crate::credentials::{default_credentials_file, detect_credentials, CredentialSource};
pub use crate::dispatch::{dispatch, execute, usage_outcome, COVERAGE};
pub use crate::effects::{
    CommandRunner, Effects, FileSystem, HostCommandRunner, SharedEffects, SystemEffects,
    ToolLocator,
};
pub use crate::mode::{Mode, USAGE};
pub use crate::outcome::{CommandStatus, ConfigError, ExecutionOutcome, PreflightError, HELP_HINT};
pub use crate::plan::{plan_for, Invocation, PlanTools};
pub use crate::preflight::{run_preflight, Preflight, PYTEST};
pub use crate::process::RunOutput;
pub use crate::report::{Reporter, SilentReporter, Tone};
