// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (silent/CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::compose::CommandSpec;
use crate::deploy::{DeployReport, ExecutionObserver, ExecutionOutcome, StepRecord};
use crate::plan::PlannedCell;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Only failures and the final result
    Quiet,
    /// JSON for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => self.json_event("success", message, false),
        }
    }

    /// Print a warning (suppressed in quiet mode).
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.json_event("warning", message, true),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => self.json_event("error", message, true),
        }
    }

    /// Print the end-of-run summary, or the whole report as JSON.
    pub fn report(&self, report: &DeployReport) {
        if self.mode == OutputMode::Json {
            match serde_json::to_string(report) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error: failed to serialize report: {e}"),
            }
            return;
        }

        if self.mode == OutputMode::Normal {
            println!();
            println!("Summary:");
            for outcome in report.outcomes() {
                println!("  {}", summary_line(outcome));
            }
        }

        let total = report.outcomes().len();
        if report.success() {
            self.success(&format!("Finished deploy: {total} cell(s) succeeded"));
        } else {
            for outcome in report.failed() {
                if self.mode == OutputMode::Quiet {
                    eprintln!("{}", summary_line(outcome));
                }
            }
            self.error(&format!(
                "Finished deploy with errors: {} of {} cell(s) failed",
                total - report.succeeded_count(),
                total
            ));
        }
    }

    fn json_event(&self, event: &str, message: &str, to_stderr: bool) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: if self.start_time.is_some() {
                Some(self.elapsed_secs())
            } else {
                None
            },
        };
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }
}

fn summary_line(outcome: &ExecutionOutcome) -> String {
    let mark = if outcome.succeeded() { "✓" } else { "✗" };
    let mut line = format!(
        "{mark} {}/{} ({:.1}s)",
        outcome.task,
        outcome.target,
        outcome.duration.as_secs_f64()
    );
    if let Some(failure) = &outcome.failure {
        line.push_str(&format!(": {failure}"));
    }
    if outcome.skipped_steps > 0 {
        line.push_str(&format!(", {} step(s) skipped", outcome.skipped_steps));
    }
    line
}

impl ExecutionObserver for Output {
    fn cell_started(&mut self, index: usize, total: usize, cell: &PlannedCell) {
        self.progress(&format!(
            "[{}/{}] Task \"{}\" on target \"{}\": Started",
            index + 1,
            total,
            cell.task,
            cell.target
        ));
    }

    fn step_started(&mut self, _cell: &PlannedCell, index: usize, command: &CommandSpec) {
        self.progress(&format!("  → Step {}: {}", index + 1, command));
    }

    fn step_finished(&mut self, _cell: &PlannedCell, record: &StepRecord) {
        if record.success() || self.mode == OutputMode::Json {
            return;
        }
        // Errors surface even in quiet mode.
        eprintln!("  ✗ {} ({})", record.command, record.exit);
        for line in record.stderr.lines() {
            eprintln!("    {line}");
        }
    }

    fn cell_finished(&mut self, outcome: &ExecutionOutcome) {
        if outcome.succeeded() {
            self.progress(&format!(
                "  ✓ Task \"{}\" on target \"{}\": Finished",
                outcome.task, outcome.target
            ));
        } else if self.mode == OutputMode::Normal {
            eprintln!(
                "  ✗ Task \"{}\" on target \"{}\": Failed",
                outcome.task, outcome.target
            );
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
