// ABOUTME: Sequential execution of the (task × target) plan.
// ABOUTME: Fails fast within a cell, always continues to the next cell.

use chrono::Utc;
use std::time::Instant;

use crate::compose::{CommandBuilder, CommandSpec};
use crate::plan::{ExecutionPlan, PlannedCell};
use crate::runner::ProcessRunner;

use super::cell::Cell;
use super::outcome::{CellFailure, ExecutionOutcome, StepRecord};
use super::report::DeployReport;
use super::state::Running;

/// Receives progress notifications while a plan executes.
///
/// Every method has an empty default so observers implement only what they
/// display.
pub trait ExecutionObserver: Send {
    /// `index` is zero-based; `total` is the plan length.
    fn cell_started(&mut self, _index: usize, _total: usize, _cell: &PlannedCell) {}

    fn step_started(&mut self, _cell: &PlannedCell, _index: usize, _command: &CommandSpec) {}

    fn step_finished(&mut self, _cell: &PlannedCell, _record: &StepRecord) {}

    fn cell_finished(&mut self, _outcome: &ExecutionOutcome) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {}

/// Runs an [`ExecutionPlan`] one cell and one sub-invocation at a time.
///
/// Failed steps never surface as errors; they are recorded in the returned
/// [`DeployReport`]. Nothing is retried.
pub struct DeployExecutor<'a, R> {
    builder: CommandBuilder<'a>,
    runner: R,
}

impl<'a, R: ProcessRunner> DeployExecutor<'a, R> {
    pub fn new(builder: CommandBuilder<'a>, runner: R) -> Self {
        Self { builder, runner }
    }

    /// Execute every cell of `plan` in order and report.
    pub async fn execute(
        &self,
        plan: &ExecutionPlan,
        observer: &mut dyn ExecutionObserver,
    ) -> DeployReport {
        let started_at = Utc::now();
        let clock = Instant::now();
        let total = plan.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, planned) in plan.iter().enumerate() {
            observer.cell_started(index, total, planned);
            let outcome = self.run_cell(planned, observer).await;
            observer.cell_finished(&outcome);
            outcomes.push(outcome);
        }

        let report = DeployReport::new(started_at, clock.elapsed(), outcomes);
        tracing::info!(
            cells = total,
            succeeded = report.succeeded_count(),
            success = report.success(),
            "deploy plan finished"
        );
        report
    }

    /// Execute a single cell.
    pub async fn run_cell(
        &self,
        planned: &PlannedCell,
        observer: &mut dyn ExecutionObserver,
    ) -> ExecutionOutcome {
        let mut cell = Cell::new(planned).start();
        tracing::info!(task = %planned.task, target = %planned.target, "cell started");

        let commands = match self.builder.build(&planned.task, &planned.target) {
            Ok(commands) => commands,
            Err(error) => {
                tracing::warn!(
                    task = %planned.task,
                    target = %planned.target,
                    "cannot build commands: {}",
                    error
                );
                return cell.fail(CellFailure::Build { error }, 0);
            }
        };

        let total = commands.len();
        for (index, command) in commands.iter().enumerate() {
            observer.step_started(planned, index, command);
            let record = self.run_step(command).await;
            observer.step_finished(planned, &record);

            if !record.success() {
                let failure = CellFailure::Step {
                    index,
                    command: record.command.clone(),
                    exit: record.exit.clone(),
                };
                let skipped = total - index - 1;
                tracing::warn!(
                    task = %planned.task,
                    target = %planned.target,
                    skipped,
                    "{}",
                    failure
                );
                cell.record(record);
                return cell.fail(failure, skipped);
            }

            cell.record(record);
        }

        finish_succeeded(cell)
    }

    async fn run_step(&self, command: &CommandSpec) -> StepRecord {
        let command_line = command.command_line();
        tracing::debug!("step: {}", command_line);

        let started = Instant::now();
        let output = self.runner.invoke(command).await;
        StepRecord::new(command_line, output, started.elapsed())
    }
}

fn finish_succeeded(cell: Cell<Running>) -> ExecutionOutcome {
    tracing::info!(
        task = %cell.task(),
        target = %cell.target(),
        steps = cell.steps().len(),
        "cell succeeded"
    );
    cell.succeed()
}
