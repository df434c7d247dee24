// ABOUTME: Combines task subcommands with target compose files and environment.
// ABOUTME: Produces one CommandSpec per subcommand, in declared order.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::config::{DeployConfig, TargetDef};
use crate::types::{TargetName, TaskName};

use super::CommandError;
use super::template::substitute;

/// A fully resolved external process invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Complete environment for the child; nothing else is inherited.
    #[serde(skip)]
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    /// Shell-quoted command line, for logs and reports.
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(self.args.iter()))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Snapshot of the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn inherited_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Builds compose invocations for one configuration.
///
/// The base environment is captured when the builder is created, so
/// [`CommandBuilder::build`] is a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct CommandBuilder<'a> {
    config: &'a DeployConfig,
    base_env: BTreeMap<String, String>,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a DeployConfig, base_env: BTreeMap<String, String>) -> Self {
        Self { config, base_env }
    }

    /// Builder over the current process environment.
    pub fn from_process_env(config: &'a DeployConfig) -> Self {
        Self::new(config, inherited_env())
    }

    /// Layer env file values over the base environment.
    pub fn with_env_file(mut self, vars: BTreeMap<String, String>) -> Self {
        self.base_env.extend(vars);
        self
    }

    /// Environment every command starts from, before target overlays.
    pub fn base_env(&self) -> &BTreeMap<String, String> {
        &self.base_env
    }

    /// Commands for `task` against `target`, one per subcommand template.
    ///
    /// # Errors
    ///
    /// Fails when the target declares no compose file, when an environment
    /// reference cannot be resolved, or when a placeholder names an unknown
    /// variable.
    pub fn build(
        &self,
        task: &TaskName,
        target: &TargetName,
    ) -> Result<Vec<CommandSpec>, CommandError> {
        let task_def = self
            .config
            .task(task)
            .ok_or_else(|| CommandError::UndeclaredTask(task.to_string()))?;
        let target_def = self
            .config
            .target(target)
            .ok_or_else(|| CommandError::undeclared_target(target.as_str()))?;

        if target_def.compose_files.is_empty() {
            return Err(CommandError::no_compose_files(target.as_str()));
        }

        let env = self.environment(target_def)?;
        let base_args = self.base_args(target_def, &env)?;

        task_def
            .subcommands
            .iter()
            .map(|subcommand| {
                let mut args = base_args.clone();
                for word in &subcommand.words {
                    args.push(substitute(word, &env)?);
                }
                Ok::<_, CommandError>(CommandSpec {
                    program: self.config.compose().program.clone(),
                    args,
                    cwd: self.config.deploy_dir().to_path_buf(),
                    env: env.clone(),
                })
            })
            .collect()
    }

    /// Base environment overlaid by the target's environment.
    fn environment(&self, target: &TargetDef) -> Result<BTreeMap<String, String>, CommandError> {
        let mut env = self.base_env.clone();
        for (key, value) in &target.environment {
            let resolved = value.resolve(&self.base_env).ok_or_else(|| {
                CommandError::MissingEnvVar {
                    target: target.name.to_string(),
                    var: key.clone(),
                }
            })?;
            env.insert(key.clone(), resolved);
        }
        Ok(env)
    }

    /// Compose leading args, project name and `-f` files.
    fn base_args(
        &self,
        target: &TargetDef,
        env: &BTreeMap<String, String>,
    ) -> Result<Vec<String>, CommandError> {
        let mut args = self.config.compose().args.clone();

        if let Some(project) = &target.project {
            args.push("-p".to_string());
            args.push(substitute(project, env)?);
        }

        for file in &target.compose_files {
            args.push("-f".to_string());
            args.push(substitute(file, env)?);
        }

        Ok(args)
    }
}
