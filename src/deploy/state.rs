// ABOUTME: Cell state marker types for the type state pattern.
// ABOUTME: Only a running cell can be finished into an outcome.

use std::time::Instant;

/// Planned but not started.
/// Available actions: `start()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Sub-invocations are being run.
/// Available actions: `record()`, `succeed()`, `fail()`
#[derive(Debug, Clone, Copy)]
pub struct Running {
    pub(crate) started: Instant,
}
