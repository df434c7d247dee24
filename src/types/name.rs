// ABOUTME: Phantom-typed, validated names for tasks and targets.
// ABOUTME: Prevents passing a target name where a task name is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use thiserror::Error;

/// Keyword that selects every declared name. Cannot be used as a name.
pub const ALL_KEYWORD: &str = "all";

const MAX_LEN: usize = 63;

/// Marker types for phantom type parameters.
pub enum TaskMarker {}
pub enum TargetMarker {}
pub enum ProjectMarker {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name '{0}' exceeds maximum length of 63 characters")]
    TooLong(String),

    #[error("name '{0}' cannot start with a hyphen")]
    StartsWithHyphen(String),

    #[error("name '{0}' is reserved")]
    Reserved(String),

    #[error("invalid character '{1}' in name '{0}'")]
    InvalidChar(String, char),
}

/// A validated name, tagged with what it names.
pub struct Name<K> {
    value: String,
    _marker: PhantomData<K>,
}

impl<K> Name<K> {
    pub fn new(value: &str) -> Result<Self, NameError> {
        if value.is_empty() {
            return Err(NameError::Empty);
        }

        if value.len() > MAX_LEN {
            return Err(NameError::TooLong(value.to_string()));
        }

        if value.starts_with('-') {
            return Err(NameError::StartsWithHyphen(value.to_string()));
        }

        if value == ALL_KEYWORD {
            return Err(NameError::Reserved(value.to_string()));
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.'))
        {
            return Err(NameError::InvalidChar(value.to_string(), c));
        }

        Ok(Self {
            value: value.to_string(),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// Manual impls so K needs no bounds; it only appears as a phantom marker.

impl<K> std::fmt::Debug for Name<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Name").field(&self.value).finish()
    }
}

impl<K> Clone for Name<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K> PartialEq for Name<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Name<K> {}

impl<K> PartialOrd for Name<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Name<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<K> Hash for Name<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K> std::fmt::Display for Name<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<K> PartialEq<str> for Name<K> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<K> PartialEq<&str> for Name<K> {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl<K> Serialize for Name<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, K> Deserialize<'de> for Name<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(&value).map_err(serde::de::Error::custom)
    }
}

pub type TaskName = Name<TaskMarker>;
pub type TargetName = Name<TargetMarker>;
pub type ProjectName = Name<ProjectMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_names() {
        for name in ["build", "up", "prod", "staging-eu", "web_1", "v1.2"] {
            assert!(TaskName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_all_keyword() {
        assert_eq!(
            TargetName::new("all").unwrap_err(),
            NameError::Reserved("all".to_string())
        );
    }

    #[test]
    fn rejects_whitespace() {
        assert_eq!(
            TaskName::new("up -d").unwrap_err(),
            NameError::InvalidChar("up -d".to_string(), ' ')
        );
    }

    #[test]
    fn compares_with_str() {
        let name = TargetName::new("prod").unwrap();
        assert_eq!(name, "prod");
        assert_eq!(name.to_string(), "prod");
    }
}
