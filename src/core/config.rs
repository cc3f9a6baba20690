//! Check configuration: workspace root, internal scope, and exclusions
//!
//! The excluded set always contains the shared-config packages under the
//! resolved scope; `--exclude` extends it rather than replacing it.

use crate::core::error::{ConfigError, DriftError, DriftResult, ResultExt};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Shared config packages that never participate in the rebuild cascade.
/// Joined under the resolved scope, e.g. `@acme/eslint-config`.
const SHARED_CONFIG_PACKAGES: &[&str] = &["eslint-config", "tsconfig"];

/// Resolved configuration shared by the check and graph commands
#[derive(Debug, Clone)]
pub struct CheckConfig {
  /// Workspace root directory
  pub root: PathBuf,
  /// Internal package scope, e.g. `@acme`
  pub scope: String,
  /// Packages omitted from both directions of the comparison
  pub excluded: BTreeSet<String>,
}

impl CheckConfig {
  /// Resolve configuration from CLI arguments.
  ///
  /// The scope falls back to the scoped name of the root package.json
  /// (`@acme/monorepo` → `@acme`).
  pub fn resolve(root: Option<PathBuf>, scope: Option<String>, exclude: Vec<String>) -> DriftResult<Self> {
    let root = match root {
      Some(dir) => dir,
      None => std::env::current_dir()?,
    };

    let scope = match scope {
      Some(s) => s.trim_end_matches('/').to_string(),
      None => infer_scope(&root)?,
    };

    let mut excluded: BTreeSet<String> = SHARED_CONFIG_PACKAGES
      .iter()
      .map(|pkg| format!("{}/{}", scope, pkg))
      .collect();
    excluded.extend(exclude);

    Ok(Self { root, scope, excluded })
  }

  /// Resolve the cascade map path against the workspace root.
  pub fn map_path(&self, map: &Path) -> PathBuf {
    if map.is_absolute() {
      map.to_path_buf()
    } else {
      self.root.join(map)
    }
  }
}

/// Derive the internal scope from the root package.json name.
fn infer_scope(root: &Path) -> DriftResult<String> {
  let manifest_path = root.join("package.json");
  let unresolved = || {
    DriftError::Config(ConfigError::ScopeUnresolved {
      manifest: manifest_path.clone(),
    })
  };

  if !manifest_path.exists() {
    return Err(unresolved());
  }

  let content = std::fs::read_to_string(&manifest_path).context("Failed to read root package.json")?;
  let manifest: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
    DriftError::Config(ConfigError::ManifestParse {
      path: manifest_path.clone(),
      message: e.to_string(),
    })
  })?;

  let name = manifest.get("name").and_then(|n| n.as_str()).unwrap_or_default();
  if let Some((scope, _)) = name.split_once('/')
    && scope.starts_with('@')
    && scope.len() > 1
  {
    return Ok(scope.to_string());
  }

  Err(unresolved())
}
