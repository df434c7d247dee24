// ABOUTME: Validated domain types shared by config, planning and execution.
// ABOUTME: Uses phantom types to keep task and target names apart at compile time.

mod name;

pub use name::{
    ALL_KEYWORD, Name, NameError, ProjectMarker, ProjectName, TargetMarker, TargetName, TaskMarker,
    TaskName,
};
