use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::effects::{CommandRunner, Effects, FileSystem, SharedEffects, ToolLocator};
use crate::process::RunOutput;
use crate::report::{Reporter, Tone};

pub(crate) const FAKE_PYTHON: &str = "/fake/bin/python3";
pub(crate) const FAKE_PYTEST: &str = "/fake/bin/pytest";
pub(crate) const FAKE_COVERAGE: &str = "/fake/bin/coverage";
pub(crate) const FAKE_PROJECT: &str = "/work/mcp-bigquery-dryrun";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Call {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: PathBuf,
    pub(crate) passthrough: bool,
}

pub(crate) struct FakeRunner {
    version: String,
    codes: Mutex<VecDeque<i32>>,
    fail_spawn: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeRunner {
    fn record(&self, program: &str, args: &[String], cwd: &Path, passthrough: bool) {
        self.calls.lock().expect("calls lock").push(Call {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
            passthrough,
        });
    }

    fn next_code(&self) -> i32 {
        self.codes
            .lock()
            .expect("codes lock")
            .pop_front()
            .unwrap_or(0)
    }
}

impl CommandRunner for FakeRunner {
    fn run_command(&self, program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
        self.record(program, args, cwd, false);
        if args.first().map(String::as_str) == Some("-c") {
            return Ok(RunOutput {
                code: 0,
                stdout: format!("{}\n", self.version),
                stderr: String::new(),
            });
        }
        if self.fail_spawn {
            bail!("failed to start {program}");
        }
        Ok(RunOutput {
            code: self.next_code(),
            stdout: format!("captured {program}"),
            stderr: String::new(),
        })
    }

    fn run_command_passthrough(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<RunOutput> {
        self.record(program, args, cwd, true);
        if self.fail_spawn {
            bail!("failed to start {program}");
        }
        Ok(RunOutput {
            code: self.next_code(),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeFileSystem {
    files: HashSet<PathBuf>,
    cwd: Option<PathBuf>,
}

impl FakeFileSystem {
    pub(crate) fn with_files(files: &[PathBuf]) -> Self {
        Self {
            files: files.iter().cloned().collect(),
            cwd: None,
        }
    }
}

impl FileSystem for FakeFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn current_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => bail!("no working directory"),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeTools {
    tools: HashMap<String, PathBuf>,
    python: Option<String>,
}

impl ToolLocator for FakeTools {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.tools.get(program).cloned()
    }

    fn detect_interpreter(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(explicit) = explicit {
            return Ok(explicit.to_string());
        }
        match &self.python {
            Some(python) => Ok(python.clone()),
            None => bail!("no python interpreter found; set DRYRUN_TEST_PYTHON"),
        }
    }
}

pub(crate) struct FakeEffects {
    runner: FakeRunner,
    fs: FakeFileSystem,
    tools: FakeTools,
    home: Option<PathBuf>,
}

impl FakeEffects {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.runner.calls.lock().expect("calls lock").clone()
    }

    /// Calls other than the interpreter version probe.
    pub(crate) fn delegated_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|call| call.passthrough).collect()
    }

    pub(crate) fn shared(self: &Arc<Self>) -> SharedEffects {
        self.clone()
    }
}

impl Effects for FakeEffects {
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
        self.home.clone()
    }
}

/// A healthy host: python 3.11, pytest and coverage on the path, a project
/// root with `pyproject.toml`, and no credentials file.
pub(crate) struct FakeEffectsBuilder {
    version: String,
    codes: Vec<i32>,
    fail_spawn: bool,
    tools: HashMap<String, PathBuf>,
    python: Option<String>,
    files: Vec<PathBuf>,
    cwd: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl Default for FakeEffectsBuilder {
    fn default() -> Self {
        let tools = [("pytest", FAKE_PYTEST), ("coverage", FAKE_COVERAGE)]
            .into_iter()
            .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
            .collect();
        Self {
            version: "3.11.4".to_string(),
            codes: Vec::new(),
            fail_spawn: false,
            tools,
            python: Some(FAKE_PYTHON.to_string()),
            files: vec![Path::new(FAKE_PROJECT).join("pyproject.toml")],
            cwd: Some(PathBuf::from(FAKE_PROJECT)),
            home: Some(PathBuf::from("/home/tester")),
        }
    }
}

impl FakeEffectsBuilder {
    pub(crate) fn python_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub(crate) fn exit_codes(mut self, codes: &[i32]) -> Self {
        self.codes = codes.to_vec();
        self
    }

    pub(crate) fn fail_spawn(mut self) -> Self {
        self.fail_spawn = true;
        self
    }

    pub(crate) fn without_tool(mut self, name: &str) -> Self {
        self.tools.remove(name);
        self
    }

    pub(crate) fn without_python(mut self) -> Self {
        self.python = None;
        self
    }

    pub(crate) fn with_file(mut self, path: PathBuf) -> Self {
        self.files.push(path);
        self
    }

    pub(crate) fn without_project(mut self) -> Self {
        self.files.retain(|file| !file.ends_with("pyproject.toml"));
        self
    }

    pub(crate) fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(PathBuf::from(cwd));
        self
    }

    pub(crate) fn build(self) -> Arc<FakeEffects> {
        Arc::new(FakeEffects {
            runner: FakeRunner {
                version: self.version,
                codes: Mutex::new(self.codes.into()),
                fail_spawn: self.fail_spawn,
                calls: Mutex::new(Vec::new()),
            },
            fs: FakeFileSystem {
                files: self.files.into_iter().collect(),
                cwd: self.cwd,
            },
            tools: FakeTools {
                tools: self.tools,
                python: self.python,
            },
            home: self.home,
        })
    }
}

#[derive(Default)]
pub(crate) struct RecordingReporter {
    lines: RefCell<Vec<(Tone, String)>>,
}

impl RecordingReporter {
    pub(crate) fn lines(&self) -> Vec<(Tone, String)> {
        self.lines.borrow().clone()
    }

    pub(crate) fn contains(&self, tone: Tone, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(t, text)| *t == tone && text.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn line(&self, tone: Tone, text: &str) {
        self.lines.borrow_mut().push((tone, text.to_string()));
    }
}
