// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted ProcessRunner, config fixtures and tracing setup.

use async_trait::async_trait;
use deployhelp::compose::CommandSpec;
use deployhelp::runner::{ExitStatus, ProcessOutput, ProcessRunner};
use parking_lot::Mutex;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("deployhelp=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Two tasks, two targets, no defaults.
#[allow(dead_code)]
pub const TWO_BY_TWO: &str = r#"
tasks:
  build: [build]
  up: ["up -d"]
targets:
  staging:
    compose_files: [docker-compose.staging.yml]
  prod:
    compose_files: [docker-compose.prod.yml]
"#;

/// Fake runner that records every invocation and never starts a process.
///
/// Commands succeed unless their command line contains a needle registered
/// with [`ScriptedRunner::fail_when`].
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failures: Vec<(String, ExitStatus)>,
}

#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_when(mut self, needle: &str, code: i32) -> Self {
        self.failures
            .push((needle.to_string(), ExitStatus::Code(code)));
        self
    }

    pub fn launch_fail_when(mut self, needle: &str) -> Self {
        self.failures.push((
            needle.to_string(),
            ExitStatus::LaunchFailed("No such file or directory (os error 2)".to_string()),
        ));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(CommandSpec::command_line).collect()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn invoke(&self, command: &CommandSpec) -> ProcessOutput {
        let line = command.command_line();
        self.calls.lock().push(command.clone());

        match self.failures.iter().find(|(needle, _)| line.contains(needle)) {
            Some((_, exit)) => ProcessOutput {
                exit: exit.clone(),
                stdout: Vec::new(),
                stderr: format!("scripted failure: {line}").into_bytes(),
            },
            None => ProcessOutput {
                exit: ExitStatus::Code(0),
                stdout: format!("ok: {line}").into_bytes(),
                stderr: Vec::new(),
            },
        }
    }
}
