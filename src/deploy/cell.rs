// ABOUTME: One (task, target) cell parameterized by its execution state.
// ABOUTME: Finishing a running cell yields an immutable ExecutionOutcome.

use std::time::Instant;

use crate::plan::PlannedCell;
use crate::types::{TargetName, TaskName};

use super::outcome::{CellFailure, CellStatus, ExecutionOutcome, StepRecord};
use super::state::{Pending, Running};

/// A cell of the execution plan in state `S`.
#[derive(Debug)]
pub struct Cell<S> {
    task: TaskName,
    target: TargetName,
    steps: Vec<StepRecord>,
    state: S,
}

impl<S> Cell<S> {
    pub fn task(&self) -> &TaskName {
        &self.task
    }

    pub fn target(&self) -> &TargetName {
        &self.target
    }
}

impl Cell<Pending> {
    pub fn new(planned: &PlannedCell) -> Self {
        Cell {
            task: planned.task.clone(),
            target: planned.target.clone(),
            steps: Vec::new(),
            state: Pending,
        }
    }

    /// Pending -> Running
    pub fn start(self) -> Cell<Running> {
        Cell {
            task: self.task,
            target: self.target,
            steps: self.steps,
            state: Running {
                started: Instant::now(),
            },
        }
    }
}

impl Cell<Running> {
    /// Append a finished sub-invocation.
    pub fn record(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Running -> Succeeded
    pub fn succeed(self) -> ExecutionOutcome {
        self.finish(CellStatus::Succeeded, None, 0)
    }

    /// Running -> Failed, with `skipped` sub-invocations never run.
    pub fn fail(self, failure: CellFailure, skipped: usize) -> ExecutionOutcome {
        self.finish(CellStatus::Failed, Some(failure), skipped)
    }

    fn finish(
        self,
        status: CellStatus,
        failure: Option<CellFailure>,
        skipped_steps: usize,
    ) -> ExecutionOutcome {
        ExecutionOutcome {
            task: self.task,
            target: self.target,
            status,
            failure,
            steps: self.steps,
            skipped_steps,
            duration: self.state.started.elapsed(),
        }
    }
}
