use std::path::PathBuf;

use crate::config::{Config, EnvSnapshot};
use crate::effects::{self, SharedEffects};
use crate::report::Reporter;

/// Everything one invocation reads: the environment captured at startup, the
/// configuration derived from it, host effects, and the status line sink.
pub struct CommandContext<'a> {
    env: EnvSnapshot,
    config: Config,
    effects: SharedEffects,
    reporter: &'a dyn Reporter,
}

impl<'a> CommandContext<'a> {
    pub fn with_env(env: EnvSnapshot, effects: SharedEffects, reporter: &'a dyn Reporter) -> Self {
        let config = Config::from_snapshot(&env);
        Self {
            env,
            config,
            effects,
            reporter,
        }
    }

    pub fn runner(&self) -> &dyn effects::CommandRunner {
        self.effects.runner()
    }

    pub fn fs(&self) -> &dyn effects::FileSystem {
        self.effects.fs()
    }

    pub fn tools(&self) -> &dyn effects::ToolLocator {
        self.effects.tools()
    }

    pub fn home_dir(&self) -> Option<PathBuf> {
        self.effects.home_dir()
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }
}
