// ABOUTME: Property and example tests for selection and plan construction.
// ABOUTME: Plan order must follow declarations, never request order.

use deployhelp::config::DeployConfig;
use deployhelp::error::Error;
use deployhelp::plan::{self, ExecutionPlan};
use proptest::prelude::*;

const CONFIG: &str = r#"
tasks:
  build: [build]
  push: [push]
  up: ["up -d"]
  down: [down]
defaults:
  tasks: [build, up]
targets:
  dev:
    compose_files: [dev.yml]
  staging:
    compose_files: [staging.yml]
  prod:
    compose_files: [prod.yml]
"#;

const TASKS: &[&str] = &["build", "push", "up", "down"];
const TARGETS: &[&str] = &["dev", "staging", "prod"];

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn cells(plan: &ExecutionPlan) -> Vec<(String, String)> {
    plan.iter()
        .map(|c| (c.task.to_string(), c.target.to_string()))
        .collect()
}

#[test]
fn empty_request_uses_defaults_and_all_targets() {
    let config = DeployConfig::from_yaml(CONFIG).unwrap();
    let selection = plan::resolve(&config, &[], &[]).unwrap();

    assert_eq!(selection.tasks, ["build", "up"]);
    assert_eq!(selection.targets, ["dev", "staging", "prod"]);
    assert_eq!(ExecutionPlan::new(&selection).len(), 6);
}

#[test]
fn all_keyword_selects_everything() {
    let config = DeployConfig::from_yaml(CONFIG).unwrap();
    let selection = plan::resolve(&config, &strings(&["up", "all"]), &strings(&["all"])).unwrap();

    assert_eq!(selection.tasks, ["build", "push", "up", "down"]);
    assert_eq!(selection.targets.len(), 3);
}

#[test]
fn requested_names_are_trimmed() {
    let config = DeployConfig::from_yaml(CONFIG).unwrap();
    let selection =
        plan::resolve(&config, &strings(&[" up ", ""]), &strings(&["prod "])).unwrap();

    assert_eq!(selection.tasks, ["up"]);
    assert_eq!(selection.targets, ["prod"]);
}

#[test]
fn unknown_names_are_all_reported() {
    let config = DeployConfig::from_yaml(CONFIG).unwrap();

    let err = plan::resolve(&config, &strings(&["up", "deploy", "ship", "deploy"]), &[])
        .unwrap_err();
    match err {
        Error::UnknownTask(names) => assert_eq!(names, ["deploy", "ship"]),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = plan::resolve(&config, &[], &strings(&["qa"])).unwrap_err();
    assert_eq!(err.to_string(), "unknown target(s): qa");
}

#[test]
fn unknown_tasks_and_targets_are_listed_in_one_error() {
    let config = DeployConfig::from_yaml(CONFIG).unwrap();
    let err = plan::resolve(&config, &strings(&["ship"]), &strings(&["qa", "prod"])).unwrap_err();
    assert!(matches!(err, Error::UnknownNames { .. }));
    assert_eq!(
        err.to_string(),
        "unknown task(s): ship; unknown target(s): qa"
    );
}

#[test]
fn names_are_case_sensitive() {
    let config = DeployConfig::from_yaml(CONFIG).unwrap();
    let err = plan::resolve(&config, &strings(&["Build"]), &[]).unwrap_err();
    assert!(matches!(err, Error::UnknownTask(_)));
}

fn subset(all: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(all, 1..=all.len()).prop_shuffle()
}

proptest! {
    #[test]
    fn plan_is_independent_of_request_order(
        tasks in subset(TASKS),
        targets in subset(TARGETS),
    ) {
        let config = DeployConfig::from_yaml(CONFIG).unwrap();

        let forward = plan::resolve(&config, &strings(&tasks), &strings(&targets)).unwrap();
        let mut rev_tasks = tasks.clone();
        rev_tasks.reverse();
        let mut rev_targets = targets.clone();
        rev_targets.reverse();
        let reversed = plan::resolve(&config, &strings(&rev_tasks), &strings(&rev_targets)).unwrap();

        prop_assert_eq!(&forward, &reversed);

        let plan = ExecutionPlan::new(&forward);
        prop_assert_eq!(plan.len(), tasks.len() * targets.len());

        // Tasks outer, targets inner, both in declaration order.
        let expected: Vec<(String, String)> = TASKS
            .iter()
            .filter(|t| tasks.contains(t))
            .flat_map(|t| {
                TARGETS
                    .iter()
                    .filter(|g| targets.contains(g))
                    .map(move |g| (t.to_string(), g.to_string()))
            })
            .collect();
        prop_assert_eq!(cells(&plan), expected);
    }
}
