// ABOUTME: Error types for command construction.
// ABOUTME: These fail a single cell and never abort the whole run.

/// Why commands could not be built for one (task, target) cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The target is undeclared or declares no compose file.
    #[error("invalid target reference '{target}': {reason}")]
    InvalidTargetReference { target: String, reason: String },

    /// The task is not declared.
    #[error("task '{0}' is not declared")]
    UndeclaredTask(String),

    /// An environment reference has no value and no default.
    #[error("target '{target}' references unset environment variable {var}")]
    MissingEnvVar { target: String, var: String },

    /// A `{NAME}` placeholder names an unknown variable.
    #[error("unresolved placeholder {{{var}}} in '{template}'")]
    UnresolvedPlaceholder { var: String, template: String },
}

impl CommandError {
    pub fn no_compose_files(target: impl Into<String>) -> Self {
        CommandError::InvalidTargetReference {
            target: target.into(),
            reason: "target declares no compose file".to_string(),
        }
    }

    pub fn undeclared_target(target: impl Into<String>) -> Self {
        CommandError::InvalidTargetReference {
            target: target.into(),
            reason: "target is not declared".to_string(),
        }
    }
}
