// ABOUTME: Turns user requests into an ordered execution plan.
// ABOUTME: Resolves task/target selections and expands their cross product.

mod matrix;
mod selection;

pub use matrix::{ExecutionPlan, PlannedCell};
pub use selection::{Selection, resolve};
