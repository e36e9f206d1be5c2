#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::TempDir;

/// Shared body for every stub tool. The version probe answers from
/// `STUB_PYTHON_VERSION`; any other call is appended to `STUB_LOG` and exits
/// with `STUB_EXIT`.
const STUB_SCRIPT: &str = r#"#!/bin/sh
name="${0##*/}"
if [ "$name" = "python3" ] && [ "$1" = "-c" ]; then
    echo "${STUB_PYTHON_VERSION:-3.11.4}"
    exit 0
fi
echo "$name $*" >> "$STUB_LOG"
pwd > "$STUB_LOG.cwd"
exit "${STUB_EXIT:-0}"
"#;

pub const STUB_TOOLS: [&str; 3] = ["python3", "pytest", "coverage"];

/// A throwaway host: stub tools on a private PATH, an empty HOME and a
/// project directory holding `pyproject.toml`.
pub struct StubHost {
    _temp: TempDir,
    pub bin: PathBuf,
    pub home: PathBuf,
    pub project: PathBuf,
    pub log: PathBuf,
}

impl StubHost {
    pub fn new() -> Self {
        let temp = tempfile::Builder::new()
            .prefix("dryrun-test")
            .tempdir()
            .expect("tempdir");
        let root = temp.path().canonicalize().expect("canonical tempdir");
        let bin = root.join("bin");
        let home = root.join("home");
        let project = root.join("mcp-bigquery-dryrun");
        for dir in [&bin, &home, &project.join("tests")] {
            fs::create_dir_all(dir).expect("create dir");
        }
        fs::write(project.join("pyproject.toml"), "[project]\nname = \"mcp-bigquery-dryrun\"\n")
            .expect("write pyproject");
        for tool in STUB_TOOLS {
            write_stub(&bin, tool);
        }
        let log = root.join("calls.log");
        Self {
            _temp: temp,
            bin,
            home,
            project,
            log,
        }
    }

    pub fn without(self, tool: &str) -> Self {
        fs::remove_file(self.bin.join(tool)).expect("remove stub");
        self
    }

    pub fn with_default_credentials(self) -> Self {
        let dir = self.home.join(".config").join("gcloud");
        fs::create_dir_all(&dir).expect("gcloud dir");
        fs::write(dir.join("application_default_credentials.json"), "{}").expect("adc file");
        self
    }

    /// The binary with a scrubbed environment rooted in the project dir.
    pub fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dryrun-test");
        cmd.env_clear()
            .current_dir(&self.project)
            .env("PATH", &self.bin)
            .env("HOME", &self.home)
            .env("STUB_LOG", &self.log)
            .env("NO_COLOR", "1");
        cmd
    }

    /// Delegated calls in order, as `<tool> <args...>`.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|text| text.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Working directory of the last delegated call.
    pub fn last_cwd(&self) -> Option<PathBuf> {
        let mut path = self.log.clone().into_os_string();
        path.push(".cwd");
        fs::read_to_string(PathBuf::from(path))
            .ok()
            .map(|text| PathBuf::from(text.trim()))
    }
}

#[cfg(unix)]
fn write_stub(dir: &Path, name: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, STUB_SCRIPT).expect("write stub");
    let mut perms = fs::metadata(&path).expect("stub metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub");
}

#[cfg(not(unix))]
fn write_stub(_dir: &Path, _name: &str) {}
