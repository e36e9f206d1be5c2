use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Execute a program and capture stdout/stderr.
///
/// # Errors
///
/// Returns an error when the program cannot be spawned or waited on.
pub fn run_command(program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
    let output = configured_command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(RunOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Execute a program with inherited stdio so test output reaches the terminal
/// as it is produced. Blocks until the program exits.
///
/// # Errors
///
/// Returns an error when the program cannot be spawned or waited on.
pub fn run_command_passthrough(program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
    let status = configured_command(program, args, cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(RunOutput {
        code: status.code().unwrap_or(-1),
        stdout: String::new(),
        stderr: String::new(),
    })
}

fn configured_command(program: &str, args: &[String], cwd: &Path) -> Command {
    tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning");
    let mut command = Command::new(program);
    command.args(args);
    command.current_dir(cwd);
    command
}
