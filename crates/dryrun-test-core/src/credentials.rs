use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::config::{EnvSnapshot, CREDENTIALS_ENV, PROJECT_ENV};
use crate::effects::FileSystem;

const DEFAULT_CREDENTIALS_FILE: [&str; 3] =
    [".config", "gcloud", "application_default_credentials.json"];

/// Where a credentials signal was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    KeyFile(String),
    ApplicationDefault(PathBuf),
    Project(String),
}

impl CredentialSource {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::KeyFile(path) => format!("{CREDENTIALS_ENV}={path}"),
            CredentialSource::ApplicationDefault(path) => {
                format!("application default credentials at {}", path.display())
            }
            CredentialSource::Project(project) => format!("{PROJECT_ENV}={project}"),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            CredentialSource::KeyFile(path) => json!({ "source": "key_file", "path": path }),
            CredentialSource::ApplicationDefault(path) => json!({
                "source": "application_default",
                "path": path.display().to_string(),
            }),
            CredentialSource::Project(project) => {
                json!({ "source": "project", "project": project })
            }
        }
    }
}

#[must_use]
pub fn default_credentials_file(home: &Path) -> PathBuf {
    DEFAULT_CREDENTIALS_FILE
        .iter()
        .fold(home.to_path_buf(), |path, part| path.join(part))
}

/// Checks the three credential signals in order; the first hit wins.
#[must_use]
pub fn detect_credentials(
    env: &EnvSnapshot,
    home: Option<&Path>,
    fs: &dyn FileSystem,
) -> Option<CredentialSource> {
    if let Some(path) = env.non_empty(CREDENTIALS_ENV) {
        return Some(CredentialSource::KeyFile(path.to_string()));
    }
    if let Some(file) = home.map(default_credentials_file) {
        if fs.is_file(&file) {
            return Some(CredentialSource::ApplicationDefault(file));
        }
    }
    env.non_empty(PROJECT_ENV)
        .map(|project| CredentialSource::Project(project.to_string()))
}
