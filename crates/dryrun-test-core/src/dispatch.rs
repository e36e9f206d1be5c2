use serde_json::{json, Value};

use crate::context::CommandContext;
use crate::mode::{Mode, USAGE};
use crate::outcome::{ExecutionOutcome, PreflightError};
use crate::plan::{plan_for, Invocation, PlanTools, COVERAGE_HTML_DIR};
use crate::preflight::{run_preflight, Preflight};
use crate::process::RunOutput;

pub const COVERAGE: &str = "coverage";

/// Runs one invocation of the dispatcher: help short-circuits, every other
/// mode goes through preflight and then its plan.
pub fn execute(ctx: &CommandContext, mode: Mode) -> ExecutionOutcome {
    if mode == Mode::Help {
        return usage_outcome();
    }
    match run_preflight(ctx) {
        Ok(preflight) => dispatch(ctx, mode, &preflight),
        Err(outcome) => outcome,
    }
}

#[must_use]
pub fn usage_outcome() -> ExecutionOutcome {
    ExecutionOutcome::success(USAGE, json!({ "mode": Mode::Help, "passthrough": true }))
}

/// Runs the plan for `mode`, stopping at the first failing step. The outcome
/// carries the failing step's exit code unchanged.
pub fn dispatch(ctx: &CommandContext, mode: Mode, preflight: &Preflight) -> ExecutionOutcome {
    let reporter = ctx.reporter();

    let coverage = if mode == Mode::Coverage {
        reporter.info("Checking for coverage...");
        match ctx.tools().locate(COVERAGE) {
            Some(path) => {
                reporter.success(&format!("coverage found at {}", path.display()));
                Some(path.display().to_string())
            }
            None => return PreflightError::CoverageMissing.into_outcome(),
        }
    } else {
        None
    };

    let pytest = preflight.pytest.display().to_string();
    let tools = PlanTools {
        python: &preflight.python,
        pytest: &pytest,
        coverage: coverage.as_deref(),
    };
    let plan = plan_for(mode, &tools, preflight.has_credentials());
    tracing::debug!(%mode, steps = plan.len(), "dispatching");

    let stream = !ctx.config().output().json;
    let cwd = &preflight.project_root;
    reporter.info(mode.headline());

    let mut steps = Vec::with_capacity(plan.len());
    for invocation in &plan {
        reporter.info(&format!("Running: {invocation}"));
        let result = if stream {
            ctx.runner()
                .run_command_passthrough(&invocation.program, &invocation.args, cwd)
        } else {
            ctx.runner()
                .run_command(&invocation.program, &invocation.args, cwd)
        };
        let output = match result {
            Ok(output) => output,
            Err(err) => {
                reporter.error(&format!("Could not start {}: {err:#}", invocation.program));
                return ExecutionOutcome::failure(
                    format!("failed to run {}", invocation.program),
                    json!({
                        "reason": "spawn_failed",
                        "mode": mode,
                        "error": format!("{err:#}"),
                        "invocation": invocation,
                        "steps": steps,
                        "hint": "Check that the tool is still installed and executable.",
                    }),
                );
            }
        };
        let code = output.code;
        steps.push(step_details(invocation, output, stream));
        if code != 0 {
            reporter.error(&format!("{invocation} exited with {code}"));
            return ExecutionOutcome::failure(
                format!("Some tests failed (exit {code})"),
                json!({
                    "reason": "tests_failed",
                    "mode": mode,
                    "code": code,
                    "steps": steps,
                    "preflight": preflight.to_json(),
                }),
            );
        }
    }

    let mut details = json!({
        "mode": mode,
        "steps": steps,
        "preflight": preflight.to_json(),
    });
    if mode == Mode::Coverage {
        let index = preflight.project_root.join(COVERAGE_HTML_DIR).join("index.html");
        details["html_report"] = json!(index.display().to_string());
        details["hint"] = json!(format!(
            "Open {} to browse the coverage report",
            index.display()
        ));
    }
    ExecutionOutcome::success("All tests passed!", details)
}

fn step_details(invocation: &Invocation, output: RunOutput, streamed: bool) -> Value {
    let mut step = json!({
        "command": invocation.to_string(),
        "code": output.code,
        "streamed": streamed,
    });
    if !streamed {
        step["stdout"] = json!(output.stdout);
        step["stderr"] = json!(output.stderr);
    }
    step
}
