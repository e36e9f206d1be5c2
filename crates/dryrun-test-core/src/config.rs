use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

/// Explicit interpreter for the version check and the release driver.
pub const PYTHON_ENV: &str = "DRYRUN_TEST_PYTHON";
/// Tracing filter level for the dispatcher's own logs.
pub const LOG_ENV: &str = "DRYRUN_TEST_LOG";
/// `1` switches the console output to a single JSON envelope.
pub const JSON_ENV: &str = "DRYRUN_TEST_JSON";
pub const NO_COLOR_ENV: &str = "NO_COLOR";

pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    #[must_use]
    pub fn capture() -> Self {
        Self::from_os_pairs(env::vars_os())
    }

    /// Entries whose key or value is not UTF-8 are skipped; none of the
    /// variables read here can be meaningful in that form.
    fn from_os_pairs(pairs: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let vars = pairs
            .into_iter()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    #[must_use]
    pub fn flag_is_enabled(&self, key: &str) -> bool {
        matches!(self.vars.get(key).map(String::as_str), Some("1"))
    }

    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like [`EnvSnapshot::var`], but an empty value counts as unset.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.var(key).filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) output: OutputConfig,
    pub(crate) python: PythonConfig,
    pub(crate) log: LogConfig,
}

impl Config {
    #[must_use]
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            output: OutputConfig {
                json: snapshot.flag_is_enabled(JSON_ENV),
                color: !snapshot.contains(NO_COLOR_ENV),
            },
            python: PythonConfig {
                explicit: snapshot.non_empty(PYTHON_ENV).map(ToOwned::to_owned),
            },
            log: LogConfig {
                level: snapshot
                    .non_empty(LOG_ENV)
                    .map(str::trim)
                    .filter(|level| !level.is_empty())
                    .map_or_else(|| "warn".to_string(), str::to_ascii_lowercase),
            },
        }
    }

    #[must_use]
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    #[must_use]
    pub fn python(&self) -> &PythonConfig {
        &self.python
    }

    #[must_use]
    pub fn log(&self) -> &LogConfig {
        &self.log
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub json: bool,
    pub color: bool,
}

#[derive(Debug, Clone)]
pub struct PythonConfig {
    pub explicit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
}
