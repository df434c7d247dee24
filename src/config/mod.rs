// ABOUTME: Deploy configuration types and parsing for config.yml.
// ABOUTME: Handles YAML parsing, invariant validation, and env file discovery.

mod deserialize;
mod env_file;
mod env_value;
mod scaffold;

pub use env_file::load_env_file;
pub use env_value::EnvValue;
pub use scaffold::{QuickstartOptions, SCAFFOLD_TASKS, quickstart};

use crate::error::{Error, Result};
use crate::types::{ALL_KEYWORD, Name, TargetName, TaskName};
use deserialize::{OneOrMany, ordered_entries, string_list};
use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.yml";
pub const CONFIG_FILENAME_ALT: &str = "config.yaml";
pub const DEFAULT_DEPLOY_DIR: &str = "deploy";
/// Env file read when the configuration names none.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// A validated deploy configuration.
///
/// Built once per run by [`DeployConfig::load`] and passed by reference to
/// every component that needs it. There are no setters.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    source: PathBuf,
    deploy_dir: PathBuf,
    compose: ComposeSettings,
    env_file: Option<PathBuf>,
    tasks: Vec<TaskDef>,
    targets: Vec<TargetDef>,
    defaults: Defaults,
}

/// A named, ordered sequence of compose subcommands.
#[derive(Debug, Clone)]
pub struct TaskDef {
    pub name: TaskName,
    pub subcommands: NonEmpty<Subcommand>,
}

/// One compose subcommand template, pre-split into shell words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub template: String,
    pub words: Vec<String>,
}

/// A named deployment destination.
#[derive(Debug, Clone)]
pub struct TargetDef {
    pub name: TargetName,
    pub compose_files: Vec<String>,
    pub project: Option<String>,
    pub environment: BTreeMap<String, EnvValue>,
}

/// Names used when the user requests none. May contain the `all` keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub tasks: Vec<String>,
    pub targets: Vec<String>,
}

/// How the compose-capable executable is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeSettings {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
            args: vec!["compose".to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    compose: Option<RawCompose>,

    #[serde(default)]
    env_file: Option<PathBuf>,

    #[serde(default, deserialize_with = "ordered_entries")]
    tasks: Vec<(String, Option<OneOrMany>)>,

    #[serde(default)]
    defaults: Option<RawDefaults>,

    #[serde(default, deserialize_with = "ordered_entries")]
    targets: Vec<(String, Option<RawTarget>)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompose {
    command: OneOrMany,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefaults {
    #[serde(default, deserialize_with = "string_list")]
    tasks: Vec<String>,

    #[serde(default, deserialize_with = "string_list")]
    targets: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTarget {
    #[serde(default, deserialize_with = "string_list")]
    compose_files: Vec<String>,

    #[serde(default)]
    project: Option<String>,

    #[serde(default)]
    environment: Option<BTreeMap<String, EnvValue>>,
}

impl DeployConfig {
    /// Parse a configuration held in memory. Relative paths resolve against
    /// the current directory.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::parse(yaml.as_bytes(), Path::new(CONFIG_FILENAME))
    }

    /// Load a configuration file. Its parent directory becomes the deploy
    /// directory that compose commands run in.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read(path)?;
        Self::parse(&content, path)
    }

    /// Find and load the configuration inside a deploy directory.
    pub fn discover(deploy_dir: &Path) -> Result<Self> {
        let candidates = [
            deploy_dir.join(CONFIG_FILENAME),
            deploy_dir.join(CONFIG_FILENAME_ALT),
        ];

        for path in &candidates {
            if path.is_file() {
                tracing::debug!("using configuration {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(deploy_dir.to_path_buf()))
    }

    fn parse(yaml: &[u8], source: &Path) -> Result<Self> {
        let raw: RawConfig = serde_yaml::from_slice(yaml).map_err(|e| Error::ConfigMalformed {
            path: source.to_path_buf(),
            source: e,
        })?;

        let deploy_dir = match source.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Validator::default().finish(raw, source, deploy_dir)
    }

    /// Path of the file this configuration was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory compose commands run in.
    pub fn deploy_dir(&self) -> &Path {
        &self.deploy_dir
    }

    pub fn compose(&self) -> &ComposeSettings {
        &self.compose
    }

    /// Env file path resolved against the deploy directory.
    ///
    /// Falls back to [`DEFAULT_ENV_FILE`] when the configuration names none.
    pub fn env_file(&self) -> PathBuf {
        let name = self
            .env_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));
        self.deploy_dir.join(name)
    }

    /// Whether `env_file` was set explicitly.
    pub fn env_file_configured(&self) -> bool {
        self.env_file.is_some()
    }

    pub fn tasks(&self) -> &[TaskDef] {
        &self.tasks
    }

    pub fn targets(&self) -> &[TargetDef] {
        &self.targets
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn task(&self, name: &TaskName) -> Option<&TaskDef> {
        self.tasks.iter().find(|t| &t.name == name)
    }

    pub fn target(&self, name: &TargetName) -> Option<&TargetDef> {
        self.targets.iter().find(|t| &t.name == name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &TaskName> {
        self.tasks.iter().map(|t| &t.name)
    }

    pub fn target_names(&self) -> impl Iterator<Item = &TargetName> {
        self.targets.iter().map(|t| &t.name)
    }
}

/// Collects every invariant violation before failing.
#[derive(Default)]
struct Validator {
    problems: Vec<String>,
}

impl Validator {
    fn problem(&mut self, message: String) {
        self.problems.push(message);
    }

    fn name<K>(&mut self, kind: &str, value: &str, seen: &mut HashSet<String>) -> Option<Name<K>> {
        if !seen.insert(value.to_string()) {
            self.problem(format!("duplicate {kind} name '{value}'"));
            return None;
        }
        match Name::new(value) {
            Ok(name) => Some(name),
            Err(e) => {
                self.problem(format!("{kind}: {e}"));
                None
            }
        }
    }

    fn subcommand(&mut self, task: &str, template: String) -> Option<Subcommand> {
        match shell_words::split(&template) {
            Ok(words) if words.is_empty() => {
                self.problem(format!("task '{task}' has an empty subcommand"));
                None
            }
            Ok(words) => Some(Subcommand { template, words }),
            Err(e) => {
                self.problem(format!("task '{task}' subcommand '{template}': {e}"));
                None
            }
        }
    }

    fn defaults(&mut self, kind: &str, names: Vec<String>, declared: &HashSet<String>) -> Vec<String> {
        for name in &names {
            if name != ALL_KEYWORD && !declared.contains(name) {
                self.problem(format!("default {kind} '{name}' is not declared"));
            }
        }
        names
    }

    fn finish(mut self, raw: RawConfig, source: &Path, deploy_dir: PathBuf) -> Result<DeployConfig> {
        let compose = match raw.compose {
            None => ComposeSettings::default(),
            Some(c) => {
                let mut words = c.command.into_vec().into_iter().filter(|w| !w.trim().is_empty());
                match words.next() {
                    Some(program) => ComposeSettings {
                        program,
                        args: words.collect(),
                    },
                    None => {
                        self.problem("compose command cannot be empty".to_string());
                        ComposeSettings::default()
                    }
                }
            }
        };

        if raw.tasks.is_empty() {
            self.problem("no tasks declared".to_string());
        }
        if raw.targets.is_empty() {
            self.problem("no targets declared".to_string());
        }

        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(raw.tasks.len());
        for (name, templates) in raw.tasks {
            let templates = templates.map(OneOrMany::into_vec).unwrap_or_default();
            let subcommands: Vec<_> = templates
                .into_iter()
                .filter_map(|t| self.subcommand(&name, t))
                .collect();
            let Some(task_name) = self.name("task", &name, &mut seen) else {
                continue;
            };
            match NonEmpty::from_vec(subcommands) {
                Some(subcommands) => tasks.push(TaskDef {
                    name: task_name,
                    subcommands,
                }),
                None => self.problem(format!("task '{name}' has no subcommands")),
            }
        }
        let declared_tasks = seen;

        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(raw.targets.len());
        for (name, target) in raw.targets {
            let Some(target_name) = self.name("target", &name, &mut seen) else {
                continue;
            };
            let target = target.unwrap_or_default();
            targets.push(TargetDef {
                name: target_name,
                compose_files: target.compose_files,
                project: target.project,
                environment: target.environment.unwrap_or_default(),
            });
        }
        let declared_targets = seen;

        let raw_defaults = raw.defaults.unwrap_or_default();
        let defaults = Defaults {
            tasks: self.defaults("task", raw_defaults.tasks, &declared_tasks),
            targets: self.defaults("target", raw_defaults.targets, &declared_targets),
        };

        if !self.problems.is_empty() {
            return Err(Error::ConfigInvalid {
                path: source.to_path_buf(),
                reason: self.problems.join("; "),
            });
        }

        Ok(DeployConfig {
            source: source.to_path_buf(),
            deploy_dir,
            compose,
            env_file: raw.env_file,
            tasks,
            targets,
            defaults,
        })
    }
}
