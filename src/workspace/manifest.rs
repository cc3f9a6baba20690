//! package.json reading (minimal fields the checker cares about)

use crate::core::error::{ConfigError, DriftError, DriftResult, ResultExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// package.json structure (minimal fields we care about)
///
/// Dependency specifiers stay raw JSON values: a non-string specifier is
/// ignored by the graph builder instead of failing the whole parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageManifest {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub dependencies: BTreeMap<String, Value>,
  #[serde(default)]
  #[serde(rename = "devDependencies")]
  pub dev_dependencies: BTreeMap<String, Value>,
}

impl PackageManifest {
  /// Merge dependencies and devDependencies into one mapping.
  ///
  /// A name declared in both sections resolves to the devDependencies
  /// specifier.
  pub fn all_dependencies(&self) -> BTreeMap<&str, &Value> {
    let mut all: BTreeMap<&str, &Value> = BTreeMap::new();
    for (name, spec) in &self.dependencies {
      all.insert(name, spec);
    }
    for (name, spec) in &self.dev_dependencies {
      all.insert(name, spec);
    }
    all
  }
}

/// Source of workspace member manifests
pub trait ManifestReader {
  /// Read the manifest at `location`, or `None` when the member has no
  /// package.json (not every workspace member is publishable).
  fn read(&self, location: &str) -> DriftResult<Option<PackageManifest>>;
}

/// Reads package.json files relative to the workspace root
pub struct FsManifestReader {
  root: PathBuf,
}

impl FsManifestReader {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }
}

impl ManifestReader for FsManifestReader {
  fn read(&self, location: &str) -> DriftResult<Option<PackageManifest>> {
    let path = self.root.join(location).join("package.json");
    if !path.exists() {
      return Ok(None);
    }

    let content = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest = serde_json::from_str(&content).map_err(|e| {
      DriftError::Config(ConfigError::ManifestParse {
        path: path.clone(),
        message: e.to_string(),
      })
    })?;

    Ok(Some(manifest))
  }
}
