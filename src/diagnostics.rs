// ABOUTME: Diagnostics accumulator for non-fatal warnings during a deploy run.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ComposeSettings;

/// Collects non-fatal warnings during deploy operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Warn when the compose executable cannot be found on the child's PATH.
    ///
    /// Steps still run and fail individually, so this never aborts.
    pub fn check_compose_program(
        &mut self,
        compose: &ComposeSettings,
        env: &BTreeMap<String, String>,
        cwd: &Path,
    ) {
        if which::which_in(&compose.program, env.get("PATH"), cwd).is_err() {
            self.warn(Warning::compose_not_found(format!(
                "compose executable '{}' was not found on PATH",
                compose.program
            )));
        }
    }
}

/// A non-fatal warning collected during a deploy run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a missing env file warning.
    pub fn env_file_missing(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::EnvFileMissing,
            message: message.into(),
        }
    }

    /// Create a missing compose executable warning.
    pub fn compose_not_found(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ComposeNotFound,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a deploy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The configured env file does not exist; it is skipped.
    EnvFileMissing,
    /// The compose executable is not on PATH; every step will fail to launch.
    ComposeNotFound,
}
