use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::process::{run_command, run_command_passthrough, RunOutput};

/// Spawns external programs and reports their exit status.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with captured output.
    fn run_command(&self, program: &str, args: &[String], cwd: &Path) -> Result<RunOutput>;

    /// Runs `program` with inherited stdio.
    fn run_command_passthrough(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<RunOutput>;
}

pub trait FileSystem: Send + Sync {
    fn is_file(&self, path: &Path) -> bool;
    fn current_dir(&self) -> Result<PathBuf>;
}

pub trait ToolLocator: Send + Sync {
    /// Resolves an executable on the search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;
    /// Resolves the python interpreter, honouring an explicit override.
    fn detect_interpreter(&self, explicit: Option<&str>) -> Result<String>;
}

pub trait Effects: Send + Sync {
    fn runner(&self) -> &dyn CommandRunner;
    fn fs(&self) -> &dyn FileSystem;
    fn tools(&self) -> &dyn ToolLocator;
    fn home_dir(&self) -> Option<PathBuf>;
}

pub type SharedEffects = Arc<dyn Effects>;

pub struct SystemEffects {
    runner: HostCommandRunner,
    fs: SystemFileSystem,
    tools: SystemToolLocator,
}

impl SystemEffects {
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: HostCommandRunner,
            fs: SystemFileSystem,
            tools: SystemToolLocator,
        }
    }

    #[must_use]
    pub fn shared() -> SharedEffects {
        Arc::new(Self::new())
    }
}

impl Default for SystemEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl Effects for SystemEffects {
    fn runner(&self) -> &dyn CommandRunner {
        &self.runner
    }

    fn fs(&self) -> &dyn FileSystem {
        &self.fs
    }

    fn tools(&self) -> &dyn ToolLocator {
        &self.tools
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs_next::home_dir()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HostCommandRunner;

impl CommandRunner for HostCommandRunner {
    fn run_command(&self, program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
        run_command(program, args, cwd)
    }

    fn run_command_passthrough(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<RunOutput> {
        run_command_passthrough(program, args, cwd)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct SystemFileSystem;

impl FileSystem for SystemFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().context("failed to read the working directory")
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct SystemToolLocator;

impl ToolLocator for SystemToolLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn detect_interpreter(&self, explicit: Option<&str>) -> Result<String> {
        dryrun_test_python::detect_interpreter(explicit)
    }
}
