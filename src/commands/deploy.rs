// ABOUTME: Deploy command implementation.
// ABOUTME: Loads config, resolves the selection, runs the plan and reports.

use crate::cli::DeployArgs;
use deployhelp::compose::CommandBuilder;
use deployhelp::config::{DeployConfig, load_env_file};
use deployhelp::deploy::{DeployExecutor, DeployReport};
use deployhelp::diagnostics::{Diagnostics, Warning};
use deployhelp::error::{Error, Result};
use deployhelp::input::{InputProvider, PromptInput, ProvidedInput};
use deployhelp::output::{Output, OutputMode};
use deployhelp::plan::{self, ExecutionPlan};
use deployhelp::runner::TokioProcessRunner;
use deployhelp::types::Name;
use std::io::{self, BufReader};
use std::path::Path;

/// Run the deploy command. Returns whether every cell succeeded.
pub async fn deploy(args: DeployArgs) -> Result<bool> {
    let mode = if args.json {
        OutputMode::Json
    } else if args.silent {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    let preset = ProvidedInput::new(args.tasks, args.targets);

    let report = if args.silent {
        let mut input = preset;
        run_deploy(&args.deploydir, &mut input, &mut output).await?
    } else {
        // Prompts go to stderr so JSON on stdout stays parseable.
        let mut input = PromptInput::new(BufReader::new(io::stdin()), io::stderr(), preset);
        run_deploy(&args.deploydir, &mut input, &mut output).await?
    };

    Ok(report.success())
}

async fn run_deploy(
    deploy_dir: &Path,
    input: &mut dyn InputProvider,
    output: &mut Output,
) -> Result<DeployReport> {
    output.start_timer();
    output.progress("Started deploy");

    let config = DeployConfig::discover(deploy_dir)?;
    let mut diag = Diagnostics::default();

    let mut builder = CommandBuilder::from_process_env(&config);
    let env_file = config.env_file();
    match load_env_file(&env_file)? {
        Some(vars) => builder = builder.with_env_file(vars),
        // The default env file is optional.
        None if config.env_file_configured() => diag.warn(Warning::env_file_missing(format!(
            "env file {} was not found, skipping",
            env_file.display()
        ))),
        None => tracing::debug!("no env file at {}", env_file.display()),
    }

    let declared_tasks: Vec<&str> = config.task_names().map(Name::as_str).collect();
    let declared_targets: Vec<&str> = config.target_names().map(Name::as_str).collect();
    let tasks = input.select_tasks(&declared_tasks, &config.defaults().tasks)?;
    let targets = input.select_targets(&declared_targets, &config.defaults().targets)?;

    let selection = plan::resolve(&config, &tasks, &targets)?;
    let plan = ExecutionPlan::new(&selection);

    diag.check_compose_program(config.compose(), builder.base_env(), config.deploy_dir());

    if !input.confirm(&plan)? {
        return Err(Error::Cancelled);
    }

    output.progress(&format!(
        "Running {} task(s) on {} target(s): {} cell(s)",
        selection.tasks.len(),
        selection.targets.len(),
        plan.len()
    ));

    let executor = DeployExecutor::new(builder, TokioProcessRunner);
    let report = executor.execute(&plan, output).await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.report(&report);
    Ok(report)
}
