// ABOUTME: Ordered (task × target) cross product for one deploy run.
// ABOUTME: Tasks form the outer loop and targets the inner loop.

use serde::Serialize;

use super::Selection;
use crate::types::{TargetName, TaskName};

/// One (task, target) pair awaiting execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCell {
    pub task: TaskName,
    pub target: TargetName,
}

/// Cells in the order they will run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    cells: Vec<PlannedCell>,
}

impl ExecutionPlan {
    pub fn new(selection: &Selection) -> Self {
        let cells = selection
            .tasks
            .iter()
            .flat_map(|task| {
                selection.targets.iter().map(move |target| PlannedCell {
                    task: task.clone(),
                    target: target.clone(),
                })
            })
            .collect();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedCell> {
        self.cells.iter()
    }
}
