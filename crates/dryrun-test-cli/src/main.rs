use atty::Stream;
use color_eyre::Result;
use dryrun_test_core::{
    execute, CommandContext, Config, EnvSnapshot, ExecutionOutcome, Mode, Reporter,
    SilentReporter, SystemEffects,
};

mod cli;
mod output;
mod style;

use crate::output::{emit_output, ConsoleReporter, OutputOptions};
use crate::style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let env = EnvSnapshot::capture();
    let config = Config::from_snapshot(&env);
    init_tracing(&config.log().level);

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    tracing::debug!(?args, "starting");

    let opts = OutputOptions {
        json: config.output().json,
    };
    let style = Style::new(config.output().color, atty::is(Stream::Stdout));

    let outcome = match cli::parse_mode(&args) {
        Ok(mode) => run_mode(mode, env, opts, style),
        Err(err) => err.into_outcome(),
    };
    let code = emit_output(&opts, &style, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn run_mode(mode: Mode, env: EnvSnapshot, opts: OutputOptions, style: Style) -> ExecutionOutcome {
    let console = ConsoleReporter::new(style);
    let reporter: &dyn Reporter = if opts.json { &SilentReporter } else { &console };
    let ctx = CommandContext::with_env(env, SystemEffects::shared(), reporter);
    execute(&ctx, mode)
}

fn init_tracing(level: &str) {
    let filter = format!(
        "dryrun_test={level},dryrun_test_core={level},dryrun_test_python={level}"
    );
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
