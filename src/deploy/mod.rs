// ABOUTME: Deploy orchestration over the (task × target) execution plan.
// ABOUTME: Exports the executor, cell state machine, outcomes and report.

mod cell;
mod executor;
mod outcome;
mod report;
mod state;

pub use cell::Cell;
pub use executor::{DeployExecutor, ExecutionObserver, NoopObserver};
pub use outcome::{CellFailure, CellStatus, ExecutionOutcome, StepRecord};
pub use report::DeployReport;
pub use state::{Pending, Running};
