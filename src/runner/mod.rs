// ABOUTME: Process execution for compose invocations.
// ABOUTME: Defines the ProcessRunner seam and its tokio-backed implementation.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;

use crate::compose::CommandSpec;

/// How an invoked process ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExitStatus {
    /// Exited with a status code.
    Code(i32),
    /// Killed by a signal, no status code.
    Terminated,
    /// Could not be started at all (missing executable, bad cwd, ...).
    LaunchFailed(String),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Code(0))
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Code(code) => write!(f, "exit code {code}"),
            ExitStatus::Terminated => f.write_str("terminated by signal"),
            ExitStatus::LaunchFailed(reason) => write!(f, "failed to launch: {reason}"),
        }
    }
}

/// Result of running one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit.success()
    }

    /// Output for a process that never started.
    pub fn launch_failed(reason: impl Into<String>) -> Self {
        Self {
            exit: ExitStatus::LaunchFailed(reason.into()),
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }
}

/// Runs external commands to completion.
///
/// Implementations must not fail: launch errors are reported through
/// [`ExitStatus::LaunchFailed`] so callers treat them like any failed step.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn invoke(&self, command: &CommandSpec) -> ProcessOutput;
}

#[async_trait]
impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    async fn invoke(&self, command: &CommandSpec) -> ProcessOutput {
        (**self).invoke(command).await
    }
}

#[async_trait]
impl<R: ProcessRunner + ?Sized> ProcessRunner for Box<R> {
    async fn invoke(&self, command: &CommandSpec) -> ProcessOutput {
        (**self).invoke(command).await
    }
}

/// Runs commands as child processes with captured output.
///
/// The child gets exactly the environment in the [`CommandSpec`] and no
/// stdin. No timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn invoke(&self, command: &CommandSpec) -> ProcessOutput {
        tracing::debug!(cwd = %command.cwd.display(), "running {}", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .env_clear()
            .envs(&command.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match output {
            Ok(output) => {
                let exit = match output.status.code() {
                    Some(code) => ExitStatus::Code(code),
                    None => ExitStatus::Terminated,
                };

                if exit.success() {
                    tracing::debug!("{} completed successfully", command.program);
                } else {
                    tracing::warn!("{} failed with {}", command.program, exit);
                }

                ProcessOutput {
                    exit,
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
            Err(e) => {
                tracing::error!("failed to execute {}: {}", command.program, e);
                ProcessOutput::launch_failed(e.to_string())
            }
        }
    }
}
