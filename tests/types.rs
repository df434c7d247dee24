// ABOUTME: Tests for validated task, target and project names.
// ABOUTME: Covers accepted characters, limits and the reserved keyword.

use deployhelp::types::{NameError, ProjectName, TargetName, TaskName};

#[test]
fn accepts_common_names() {
    for name in ["build", "up-d", "deploy_prod", "v1.2", "a"] {
        assert!(TaskName::new(name).is_ok(), "{name}");
    }
}

#[test]
fn rejects_empty_name() {
    assert_eq!(TaskName::new("").unwrap_err(), NameError::Empty);
}

#[test]
fn rejects_long_name() {
    assert!(TargetName::new(&"a".repeat(63)).is_ok());
    assert!(matches!(
        TargetName::new(&"a".repeat(64)),
        Err(NameError::TooLong(_))
    ));
}

#[test]
fn rejects_leading_hyphen() {
    assert!(matches!(
        TaskName::new("-f"),
        Err(NameError::StartsWithHyphen(_))
    ));
}

#[test]
fn rejects_reserved_keyword() {
    assert!(matches!(TargetName::new("all"), Err(NameError::Reserved(_))));
    assert!(TargetName::new("All").is_ok());
}

#[test]
fn rejects_special_characters() {
    assert_eq!(
        ProjectName::new("my app").unwrap_err(),
        NameError::InvalidChar("my app".to_string(), ' ')
    );
    assert!(ProjectName::new("app/prod").is_err());
}

#[test]
fn names_display_and_compare_as_strings() {
    let name = TaskName::new("build").unwrap();
    assert_eq!(name.to_string(), "build");
    assert_eq!(name, "build");
    assert_eq!(name.as_str(), "build");
}

#[test]
fn names_round_trip_through_yaml() {
    let name: TargetName = serde_yaml::from_str("prod").unwrap();
    assert_eq!(name, "prod");
    assert!(serde_yaml::from_str::<TargetName>("all").is_err());
}
