use color_eyre::Result;
use dryrun_test_core::{CommandStatus, ExecutionOutcome, Reporter, Tone};

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub json: bool,
}

/// Prints progress lines to stdout as they happen.
pub struct ConsoleReporter {
    style: Style,
}

impl ConsoleReporter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl Reporter for ConsoleReporter {
    fn line(&self, tone: Tone, text: &str) {
        println!("{}", self.style.line(tone, text));
    }
}

pub fn emit_output(
    opts: &OutputOptions,
    style: &Style,
    outcome: &ExecutionOutcome,
) -> Result<i32> {
    let code = outcome.exit_code();
    if opts.json {
        let payload = outcome.to_json_response();
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for line in render(style, outcome) {
            println!("{line}");
        }
    }
    Ok(code)
}

fn render(style: &Style, outcome: &ExecutionOutcome) -> Vec<String> {
    if outcome.is_passthrough() {
        return vec![outcome.message.clone()];
    }
    let mut lines = Vec::new();
    match outcome.status {
        CommandStatus::UserError => {
            lines.push(style.line(Tone::Error, &outcome.message));
        }
        CommandStatus::Ok | CommandStatus::Failure => {
            lines.push(String::new());
            lines.push(style.rule(&outcome.status));
            lines.push(style.status(&outcome.status, &outcome.message));
            lines.push(style.rule(&outcome.status));
        }
    }
    if let Some(hint) = outcome.hint() {
        lines.push(style.hint(hint));
    }
    lines
}
