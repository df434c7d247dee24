// ABOUTME: Loads dotenv files named by the deploy configuration.
// ABOUTME: Values are returned as a map and never written into the process environment.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Read `KEY=value` pairs from a dotenv file.
///
/// Returns `Ok(None)` when the file does not exist so callers can treat a
/// missing file as a warning.
pub fn load_env_file(path: &Path) -> Result<Option<BTreeMap<String, String>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let iter = dotenvy::from_path_iter(path).map_err(|e| Error::EnvFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut vars = BTreeMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| Error::EnvFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        vars.insert(key, value);
    }

    tracing::debug!("loaded {} variable(s) from {}", vars.len(), path.display());
    Ok(Some(vars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(&dir.path().join(".env")).unwrap().is_none());
    }

    #[test]
    fn reads_pairs_and_skips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "# comment\nENV=staging\nQUOTED=\"a b\"\n").unwrap();

        let vars = load_env_file(&path).unwrap().unwrap();
        assert_eq!(vars.get("ENV").map(String::as_str), Some("staging"));
        assert_eq!(vars.get("QUOTED").map(String::as_str), Some("a b"));
        assert_eq!(vars.len(), 2);
    }
}
