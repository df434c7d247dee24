// ABOUTME: Integration tests for the tokio process runner.
// ABOUTME: Runs real shell commands to check exit codes, output capture and isolation.

use deployhelp::compose::CommandSpec;
use deployhelp::runner::{ExitStatus, ProcessRunner, TokioProcessRunner};
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

fn shell(script: &str, cwd: &Path, env: &[(&str, &str)]) -> CommandSpec {
    let mut env: BTreeMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.entry("PATH".to_string())
        .or_insert_with(|| "/usr/bin:/bin".to_string());
    CommandSpec {
        program: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        cwd: cwd.to_path_buf(),
        env,
    }
}

/// Test: a zero exit is success and stdout is captured.
#[tokio::test]
async fn captures_stdout_on_success() {
    let temp_dir = TempDir::new().unwrap();
    let output = TokioProcessRunner
        .invoke(&shell("echo 'compose ran'", temp_dir.path(), &[]))
        .await;

    assert!(output.success());
    assert_eq!(output.exit, ExitStatus::Code(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "compose ran");
}

/// Test: non-zero exit codes are reported as-is with stderr.
#[tokio::test]
async fn reports_exit_code_and_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let output = TokioProcessRunner
        .invoke(&shell("echo 'boom' >&2; exit 7", temp_dir.path(), &[]))
        .await;

    assert!(!output.success());
    assert_eq!(output.exit, ExitStatus::Code(7));
    assert!(String::from_utf8_lossy(&output.stderr).contains("boom"));
}

/// Test: the child only sees the CommandSpec environment.
#[tokio::test]
async fn environment_is_exactly_the_spec() {
    let temp_dir = TempDir::new().unwrap();
    let spec = shell(
        "echo \"$ENV:${HOME:-unset}\"",
        temp_dir.path(),
        &[("ENV", "staging")],
    );

    let output = TokioProcessRunner.invoke(&spec).await;

    assert!(output.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "staging:unset");
}

/// Test: commands run inside the CommandSpec working directory.
#[tokio::test]
async fn runs_in_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("docker-compose.yml"), "services: {}\n").unwrap();

    let output = TokioProcessRunner
        .invoke(&shell("cat docker-compose.yml", temp_dir.path(), &[]))
        .await;

    assert!(output.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("services"));
}

/// Test: arguments are passed without shell interpretation.
#[tokio::test]
async fn arguments_are_not_reinterpreted() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("args.sh");
    fs::write(&script, "#!/bin/sh\nprintf '%s\\n' \"$@\"\n").unwrap();
    let mut perms = fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).unwrap();

    let spec = CommandSpec {
        program: script.display().to_string(),
        args: vec!["up".to_string(), "a b".to_string(), "$HOME".to_string()],
        cwd: temp_dir.path().to_path_buf(),
        env: BTreeMap::new(),
    };
    let output = TokioProcessRunner.invoke(&spec).await;

    assert!(output.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "up\na b\n$HOME\n");
}

/// Test: a missing executable is a launch failure, not a panic or error.
#[tokio::test]
async fn missing_program_is_launch_failure() {
    let temp_dir = TempDir::new().unwrap();
    let spec = CommandSpec {
        program: "/nonexistent/deployhelp-compose".to_string(),
        args: vec!["up".to_string()],
        cwd: temp_dir.path().to_path_buf(),
        env: BTreeMap::new(),
    };

    let output = TokioProcessRunner.invoke(&spec).await;

    assert!(!output.success());
    assert!(matches!(output.exit, ExitStatus::LaunchFailed(_)));
}

/// Test: a signal-terminated child has no exit code.
#[tokio::test]
async fn killed_process_is_terminated() {
    let temp_dir = TempDir::new().unwrap();
    let output = TokioProcessRunner
        .invoke(&shell("kill -9 $$", temp_dir.path(), &[]))
        .await;

    assert_eq!(output.exit, ExitStatus::Terminated);
}
