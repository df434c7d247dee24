// ABOUTME: Environment overlay value types with interpolation support.
// ABOUTME: Handles literal values and references to inherited environment variables.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    Bool(bool),
    Number(serde_yaml::Number),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Resolve against the inherited environment.
    ///
    /// Returns `None` for a reference whose variable is unset and has no default.
    pub fn resolve(&self, inherited: &BTreeMap<String, String>) -> Option<String> {
        match self {
            EnvValue::Literal(s) => Some(s.clone()),
            EnvValue::Bool(b) => Some(b.to_string()),
            EnvValue::Number(n) => Some(n.to_string()),
            EnvValue::FromEnv { var, default } => {
                inherited.get(var).cloned().or_else(|| default.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inherited() -> BTreeMap<String, String> {
        BTreeMap::from([("CI_TOKEN".to_string(), "secret".to_string())])
    }

    #[test]
    fn scalars_resolve_to_strings() {
        let values: BTreeMap<String, EnvValue> =
            serde_yaml::from_str("A: text\nB: true\nC: 8080\n").unwrap();
        let env = inherited();
        assert_eq!(values["A"].resolve(&env).as_deref(), Some("text"));
        assert_eq!(values["B"].resolve(&env).as_deref(), Some("true"));
        assert_eq!(values["C"].resolve(&env).as_deref(), Some("8080"));
    }

    #[test]
    fn reference_prefers_inherited_value() {
        let value = EnvValue::FromEnv {
            var: "CI_TOKEN".to_string(),
            default: Some("fallback".to_string()),
        };
        assert_eq!(value.resolve(&inherited()).as_deref(), Some("secret"));
    }

    #[test]
    fn reference_falls_back_to_default() {
        let value = EnvValue::FromEnv {
            var: "UNSET".to_string(),
            default: Some("fallback".to_string()),
        };
        assert_eq!(value.resolve(&inherited()).as_deref(), Some("fallback"));
    }

    #[test]
    fn reference_without_default_is_unresolved() {
        let value = EnvValue::FromEnv {
            var: "UNSET".to_string(),
            default: None,
        };
        assert_eq!(value.resolve(&inherited()), None);
    }
}
