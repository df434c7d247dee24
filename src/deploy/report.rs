// ABOUTME: End-of-run deployment report.
// ABOUTME: Overall success is the logical AND of every cell outcome.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::outcome::ExecutionOutcome;

/// Every cell outcome of one run, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    started_at: DateTime<Utc>,
    #[serde(with = "humantime_serde")]
    duration: Duration,
    success: bool,
    outcomes: Vec<ExecutionOutcome>,
}

impl DeployReport {
    pub fn new(
        started_at: DateTime<Utc>,
        duration: Duration,
        outcomes: Vec<ExecutionOutcome>,
    ) -> Self {
        let success = outcomes.iter().all(ExecutionOutcome::succeeded);
        Self {
            started_at,
            duration,
            success,
            outcomes,
        }
    }

    /// True iff every outcome succeeded.
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn outcomes(&self) -> &[ExecutionOutcome] {
        &self.outcomes
    }

    pub fn failed(&self) -> impl Iterator<Item = &ExecutionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }
}
