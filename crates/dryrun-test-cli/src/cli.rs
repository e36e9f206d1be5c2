use clap::{ArgGroup, Parser};
use dryrun_test_core::{ConfigError, Mode};

const BIN_NAME: &str = "dryrun-test";

#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    disable_help_flag = true,
    group(
        ArgGroup::new("mode")
            .multiple(false)
            .args(["quick", "release", "import", "coverage", "help"])
    )
)]
pub struct DispatchCli {
    #[arg(long, help = "Unit tests that need no credentials")]
    pub quick: bool,
    #[arg(long, help = "Release test suite")]
    pub release: bool,
    #[arg(long, help = "Import tests only")]
    pub import: bool,
    #[arg(long, help = "Full suite under coverage with text and HTML reports")]
    pub coverage: bool,
    #[arg(long, help = "Show usage")]
    pub help: bool,
}

impl DispatchCli {
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.quick {
            Mode::Quick
        } else if self.release {
            Mode::Release
        } else if self.import {
            Mode::Import
        } else if self.coverage {
            Mode::Coverage
        } else if self.help {
            Mode::Help
        } else {
            Mode::Default
        }
    }
}

/// Maps the raw arguments (without the program name) to a mode.
///
/// At most one argument is accepted; with none the default mode runs.
pub fn parse_mode(args: &[String]) -> Result<Mode, ConfigError> {
    if args.len() > 1 {
        return Err(ConfigError::TooManyArguments(args.len()));
    }
    let unrecognized = || ConfigError::Unrecognized(args.first().cloned().unwrap_or_default());

    let argv = std::iter::once(BIN_NAME).chain(args.iter().map(String::as_str));
    let cli = DispatchCli::try_parse_from(argv).map_err(|err| {
        tracing::debug!(kind = ?err.kind(), "argument rejected");
        unrecognized()
    })?;

    let mode = cli.mode();
    // `--` parses cleanly but selects nothing.
    if mode == Mode::Default && !args.is_empty() {
        return Err(unrecognized());
    }
    Ok(mode)
}
