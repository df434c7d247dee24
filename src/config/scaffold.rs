// ABOUTME: Deploy directory scaffolding for new projects.
// ABOUTME: Creates config.yml, Dockerfile and docker-compose.yml templates.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{ProjectName, TaskName};

use super::CONFIG_FILENAME;

/// Tasks the scaffold knows how to generate, with their compose subcommands.
pub const SCAFFOLD_TASKS: &[(&str, &str)] = &[("build", "build"), ("up", "up -d"), ("down", "down")];

pub const DOCKERFILE_FILENAME: &str = "Dockerfile";
pub const COMPOSE_FILENAME: &str = "docker-compose.yml";

/// Inputs for [`quickstart`].
#[derive(Debug, Clone)]
pub struct QuickstartOptions {
    pub deploy_dir: PathBuf,
    pub project: ProjectName,
    /// Requested scaffold tasks. Empty means all of [`SCAFFOLD_TASKS`].
    pub tasks: Vec<String>,
    pub force: bool,
}

/// Write the deploy directory files and return their paths.
pub fn quickstart(options: &QuickstartOptions) -> Result<Vec<PathBuf>> {
    let tasks = select_tasks(&options.tasks)?;

    if options.deploy_dir.exists() && !options.deploy_dir.is_dir() {
        return Err(Error::AlreadyExists(options.deploy_dir.clone()));
    }

    let files = [
        (CONFIG_FILENAME, config_yaml(&tasks)),
        (DOCKERFILE_FILENAME, dockerfile(&options.project)),
        (COMPOSE_FILENAME, compose_yaml(&options.project, &options.deploy_dir)),
    ];

    if !options.force {
        for (name, _) in &files {
            let path = options.deploy_dir.join(name);
            if path.exists() {
                return Err(Error::AlreadyExists(path));
            }
        }
    }

    std::fs::create_dir_all(&options.deploy_dir)?;

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = options.deploy_dir.join(name);
        std::fs::write(&path, content)?;
        tracing::info!("created {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Keep scaffold order and drop duplicates; reject anything unknown.
fn select_tasks(requested: &[String]) -> Result<Vec<(TaskName, &'static str)>> {
    let requested: Vec<&str> = requested
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let unknown: Vec<String> = requested
        .iter()
        .filter(|r| !SCAFFOLD_TASKS.iter().any(|(name, _)| name == *r))
        .map(|r| r.to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownTask(unknown));
    }

    SCAFFOLD_TASKS
        .iter()
        .filter(|(name, _)| requested.is_empty() || requested.contains(name))
        .map(|(name, subcommand)| Ok::<_, Error>((TaskName::new(name)?, *subcommand)))
        .collect()
}

fn config_yaml(tasks: &[(TaskName, &str)]) -> String {
    let mut yaml = String::from("# Generated by deployhelp quickstart\nenv_file: ../.env\n\ntasks:\n");
    for (name, subcommand) in tasks {
        yaml.push_str(&format!("  {name}: [\"{subcommand}\"]\n"));
    }

    // A single default task keeps `deploy --silent` from running down after up.
    let default_task = tasks.first().map(|(name, _)| name.as_str()).unwrap_or("build");
    yaml.push_str(&format!(
        r#"
defaults:
  tasks: [{default_task}]
  targets: [dev]

targets:
  dev:
    compose_files: [{COMPOSE_FILENAME}]
    environment:
      ENV: dev
"#
    ));
    yaml
}

fn dockerfile(project: &ProjectName) -> String {
    format!(
        r#"# use some base image
FROM python:3.12-slim

# run console commands inside image
RUN python -m pip install --upgrade pip wheel setuptools

# change current directory inside image
WORKDIR /{project}

# copy files from host to image
COPY requirements.txt .
RUN python -m pip install -r requirements.txt
COPY . .
"#
    )
}

fn compose_yaml(project: &ProjectName, deploy_dir: &Path) -> String {
    let dockerfile = deploy_dir
        .file_name()
        .map(|name| Path::new(name).join(DOCKERFILE_FILENAME))
        .unwrap_or_else(|| PathBuf::from(DOCKERFILE_FILENAME));
    format!(
        r#"services:
  {project}:
    build:
      context: ..
      dockerfile: {dockerfile}
    image: {project}:${{ENV:-latest}}
    container_name: {project}-${{ENV:-latest}}
"#,
        dockerfile = dockerfile.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_all_tasks_by_default() {
        let tasks = select_tasks(&[]).unwrap();
        let names: Vec<_> = tasks.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["build", "up", "down"]);
    }

    #[test]
    fn keeps_scaffold_order() {
        let tasks = select_tasks(&["down".to_string(), "build".to_string()]).unwrap();
        let names: Vec<_> = tasks.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["build", "down"]);
    }

    #[test]
    fn rejects_unknown_task() {
        let err = select_tasks(&["migrate".to_string()]).unwrap_err();
        assert!(matches!(err, Error::UnknownTask(names) if names == ["migrate"]));
    }
}
