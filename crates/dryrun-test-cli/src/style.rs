use color_eyre::owo_colors::OwoColorize;
use dryrun_test_core::{CommandStatus, Tone};

const RULE_WIDTH: usize = 60;

#[derive(Clone, Copy, Debug)]
pub struct Style {
    enabled: bool,
}

impl Style {
    pub fn new(color: bool, is_tty: bool) -> Self {
        Self {
            enabled: color && is_tty,
        }
    }

    /// Progress line for preflight and dispatch.
    pub fn line(&self, tone: Tone, text: &str) -> String {
        let (symbol, paint) = match tone {
            Tone::Info => ("▸", Paint::Cyan),
            Tone::Success => ("✔", Paint::Green),
            Tone::Warning => ("⚠", Paint::Yellow),
            Tone::Error => ("✖", Paint::Red),
        };
        self.paint(&format!("{symbol} {text}"), paint, false)
    }

    pub fn status(&self, status: &CommandStatus, text: &str) -> String {
        let (symbol, paint) = match status {
            CommandStatus::Ok => ("✔", Paint::Green),
            CommandStatus::UserError | CommandStatus::Failure => ("✖", Paint::Red),
        };
        self.paint(&format!("{symbol} {text}"), paint, true)
    }

    pub fn rule(&self, status: &CommandStatus) -> String {
        let paint = match status {
            CommandStatus::Ok => Paint::Green,
            CommandStatus::UserError | CommandStatus::Failure => Paint::Red,
        };
        self.paint(&"═".repeat(RULE_WIDTH), paint, false)
    }

    pub fn hint(&self, hint: &str) -> String {
        if !self.enabled {
            return format!("Tip: {hint}");
        }
        format!("{} {hint}", "Tip:".cyan().bold())
    }

    fn paint(&self, text: &str, paint: Paint, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match (paint, bold) {
            (Paint::Green, true) => text.green().bold().to_string(),
            (Paint::Green, false) => text.green().to_string(),
            (Paint::Yellow, true) => text.yellow().bold().to_string(),
            (Paint::Yellow, false) => text.yellow().to_string(),
            (Paint::Red, true) => text.red().bold().to_string(),
            (Paint::Red, false) => text.red().to_string(),
            (Paint::Cyan, true) => text.cyan().bold().to_string(),
            (Paint::Cyan, false) => text.cyan().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Paint {
    Green,
    Yellow,
    Red,
    Cyan,
}
