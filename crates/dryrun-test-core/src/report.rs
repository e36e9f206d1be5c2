//! Status lines emitted while preflight and dispatch run.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

pub trait Reporter {
    fn line(&self, tone: Tone, text: &str);

    fn info(&self, text: &str) {
        self.line(Tone::Info, text);
    }

    fn success(&self, text: &str) {
        self.line(Tone::Success, text);
    }

    fn warning(&self, text: &str) {
        tracing::warn!("{text}");
        self.line(Tone::Warning, text);
    }

    fn error(&self, text: &str) {
        self.line(Tone::Error, text);
    }
}

/// Drops every line; used for JSON output.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn line(&self, _tone: Tone, _text: &str) {}
}
