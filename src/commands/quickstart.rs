// ABOUTME: Quickstart command implementation.
// ABOUTME: Scaffolds a deploy directory for the project in the current directory.

use crate::cli::QuickstartArgs;
use deployhelp::config::{self, QuickstartOptions};
use deployhelp::error::Result;
use deployhelp::output::{Output, OutputMode};
use deployhelp::types::{ALL_KEYWORD, ProjectName};
use std::env;

pub fn quickstart(args: QuickstartArgs) -> Result<()> {
    let output = Output::new(OutputMode::Normal);

    let project = match args.project_name {
        Some(name) => ProjectName::new(&name)?,
        None => ProjectName::new(&default_project_name()?)?,
    };

    output.progress(&format!(
        "Creating service files for project \"{}\" at \"{}\":",
        project,
        args.deploydir.display()
    ));

    let options = QuickstartOptions {
        deploy_dir: args.deploydir,
        project,
        tasks: args.tasks,
        force: args.force,
    };

    for path in config::quickstart(&options)? {
        output.progress(&format!("\t{}\t✓", path.display()));
    }

    output.success("Done!");
    Ok(())
}

/// Current directory name, reduced to characters valid in image names.
fn default_project_name() -> Result<String> {
    let cwd = env::current_dir()?;
    let raw = cwd
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    Ok(project_name_from(&raw))
}

fn project_name_from(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .take(63)
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '-' || c == '_');

    if cleaned.is_empty() || cleaned == ALL_KEYWORD {
        "app".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_name_is_sanitized() {
        assert_eq!(project_name_from("my project"), "my-project");
        assert_eq!(project_name_from("--shop--"), "shop");
    }

    #[test]
    fn unusable_names_fall_back_to_app() {
        assert_eq!(project_name_from(""), "app");
        assert_eq!(project_name_from("..."), "app");
        assert_eq!(project_name_from("all"), "app");
    }
}
