// ABOUTME: Reconciles requested task and target names with the configuration.
// ABOUTME: Applies defaults, expands the `all` keyword and reports every unknown name.

use serde::Serialize;

use crate::config::DeployConfig;
use crate::error::{Error, Result};
use crate::types::{ALL_KEYWORD, Name, TargetName, TaskName};

/// Tasks and targets chosen for one run, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub tasks: Vec<TaskName>,
    pub targets: Vec<TargetName>,
}

/// Resolve requested names against `config`.
///
/// An empty request falls back to the configured defaults, and empty
/// defaults select everything. Output order is declaration order and never
/// depends on the order names were requested in.
///
/// # Errors
///
/// `Error::UnknownTask` or `Error::UnknownTarget` listing every undeclared
/// name, or `Error::UnknownNames` when both sides have some.
pub fn resolve(
    config: &DeployConfig,
    requested_tasks: &[String],
    requested_targets: &[String],
) -> Result<Selection> {
    let tasks = resolve_names(
        config.task_names(),
        requested_tasks,
        &config.defaults().tasks,
    );
    let targets = resolve_names(
        config.target_names(),
        requested_targets,
        &config.defaults().targets,
    );

    let (tasks, targets) = match (tasks, targets) {
        (Ok(tasks), Ok(targets)) => (tasks, targets),
        (Err(tasks), Ok(_)) => return Err(Error::UnknownTask(tasks)),
        (Ok(_), Err(targets)) => return Err(Error::UnknownTarget(targets)),
        (Err(tasks), Err(targets)) => return Err(Error::UnknownNames { tasks, targets }),
    };

    tracing::debug!(
        tasks = ?tasks.iter().map(Name::as_str).collect::<Vec<_>>(),
        targets = ?targets.iter().map(Name::as_str).collect::<Vec<_>>(),
        "resolved selection"
    );

    Ok(Selection { tasks, targets })
}

fn resolve_names<'a, K: 'a>(
    declared: impl Iterator<Item = &'a Name<K>>,
    requested: &[String],
    defaults: &[String],
) -> std::result::Result<Vec<Name<K>>, Vec<String>> {
    let declared: Vec<&Name<K>> = declared.collect();

    let requested: Vec<&str> = requested
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let wanted: Vec<&str> = if requested.is_empty() {
        defaults.iter().map(String::as_str).collect()
    } else {
        requested
    };

    let mut unknown: Vec<String> = Vec::new();
    for name in &wanted {
        if *name != ALL_KEYWORD
            && !declared.iter().any(|d| d.as_str() == *name)
            && !unknown.iter().any(|u| u == name)
        {
            unknown.push(name.to_string());
        }
    }
    if !unknown.is_empty() {
        return Err(unknown);
    }

    let select_all = wanted.is_empty() || wanted.contains(&ALL_KEYWORD);

    Ok(declared
        .into_iter()
        .filter(|d| select_all || wanted.contains(&d.as_str()))
        .cloned()
        .collect())
}
