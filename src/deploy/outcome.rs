// ABOUTME: Per-cell and per-step execution results.
// ABOUTME: Created once when a cell or step finishes and never mutated.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::compose::CommandError;
use crate::runner::{ExitStatus, ProcessOutput};
use crate::types::{TargetName, TaskName};

/// Terminal state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Succeeded,
    Failed,
}

/// Why a cell failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellFailure {
    /// Commands could not be built; nothing was run.
    Build {
        #[serde(serialize_with = "serialize_display")]
        error: CommandError,
    },
    /// Sub-invocation `index` (zero-based) did not succeed.
    Step {
        index: usize,
        command: String,
        exit: ExitStatus,
    },
}

impl fmt::Display for CellFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellFailure::Build { error } => write!(f, "{error}"),
            CellFailure::Step {
                index,
                command,
                exit,
            } => write!(f, "step {} `{}` failed with {}", index + 1, command, exit),
        }
    }
}

/// One finished sub-invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub command: String,
    pub exit: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl StepRecord {
    pub fn new(command: String, output: ProcessOutput, duration: Duration) -> Self {
        Self {
            command,
            exit: output.exit,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration,
        }
    }

    pub fn success(&self) -> bool {
        self.exit.success()
    }
}

/// Result of one (task, target) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    pub task: TaskName,
    pub target: TargetName,
    pub status: CellStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CellFailure>,
    pub steps: Vec<StepRecord>,
    pub skipped_steps: usize,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl ExecutionOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == CellStatus::Succeeded
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
