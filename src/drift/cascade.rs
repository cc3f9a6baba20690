//! Cascade map: the hand-maintained record of what rebuilds when a
//! package changes
//!
//! Loaded verbatim from `dependency-map.json` and treated as ground truth
//! to be checked, not trusted.

use crate::core::error::{ConfigError, DriftError, DriftResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed dependency-map.json: package name → consumer locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CascadeMap {
  entries: BTreeMap<String, Vec<String>>,
}

impl CascadeMap {
  /// Load and parse the cascade map. Both failure modes are fatal and
  /// name the offending path.
  pub fn load(path: &Path) -> DriftResult<Self> {
    if !path.exists() {
      return Err(DriftError::Config(ConfigError::MapNotFound {
        path: path.to_path_buf(),
      }));
    }

    let content = std::fs::read_to_string(path)?;
    let map = serde_json::from_str(&content).map_err(|e| {
      DriftError::Config(ConfigError::MapParse {
        path: path.to_path_buf(),
        message: e.to_string(),
      })
    })?;

    Ok(map)
  }

  pub fn contains(&self, package: &str) -> bool {
    self.entries.contains_key(package)
  }

  pub fn consumers(&self, package: &str) -> Option<&[String]> {
    self.entries.get(package).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
    self.entries.iter()
  }
}
