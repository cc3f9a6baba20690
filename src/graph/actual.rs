//! Graph builder: workspace manifests → actual dependency edges
//!
//! Edges point from a dependency package to the locations that consume it
//! through a `workspace:` specifier. Construction is two phases: collect
//! a flat list of (package, consumer) pairs, then fold them into a
//! map-of-sets. The flat pairs keep the builder testable without poking
//! at set internals.

use crate::core::error::DriftResult;
use crate::workspace::{ManifestReader, WorkspaceEntry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Version specifier prefix marking an in-repo workspace link
pub const WORKSPACE_MARKER: &str = "workspace:";

/// Grouping directory stripped when mapping a raw location to the short
/// name used in the cascade map
const PACKAGES_PREFIX: &str = "packages/";

/// A single `dependency → consumer` edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
  pub package: String,
  pub consumer: String,
}

/// Normalize a raw workspace location to the cascade map's naming
/// convention: a package nested under the grouping directory and one at
/// the repo top level share the same short name.
pub fn normalize_location(raw: &str) -> String {
  raw.strip_prefix(PACKAGES_PREFIX).unwrap_or(raw).to_string()
}

/// Dependency graph derived from workspace manifests:
/// package name → set of consumer locations.
///
/// Packages with zero detected consumers have no key at all, so every
/// consumer set is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActualGraph {
  edges: BTreeMap<String, BTreeSet<String>>,
}

impl ActualGraph {
  /// Fold flat edges into the map-of-sets form in one pure reduction.
  pub fn from_edges(edges: Vec<Edge>) -> Self {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for edge in edges {
      map.entry(edge.package).or_default().insert(edge.consumer);
    }
    Self { edges: map }
  }

  pub fn consumers(&self, package: &str) -> Option<&BTreeSet<String>> {
    self.edges.get(package)
  }

  pub fn contains(&self, package: &str) -> bool {
    self.edges.contains_key(package)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
    self.edges.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.edges.is_empty()
  }
}

/// Collect raw edges from every workspace member's manifest.
///
/// An edge exists when a member declares a dependency (or devDependency)
/// on a `scope`d package with a `workspace:` specifier. Members without a
/// manifest are skipped; packages in `excluded` never produce edges.
pub fn collect_edges(
  entries: &[WorkspaceEntry],
  reader: &dyn ManifestReader,
  scope: &str,
  excluded: &BTreeSet<String>,
) -> DriftResult<Vec<Edge>> {
  let scope_prefix = format!("{}/", scope);
  let mut edges = Vec::new();

  for entry in entries {
    let Some(manifest) = reader.read(&entry.location)? else {
      continue;
    };

    let consumer = normalize_location(&entry.location);
    for (dep, spec) in manifest.all_dependencies() {
      if !dep.starts_with(&scope_prefix) {
        continue;
      }
      if excluded.contains(dep) {
        continue;
      }
      // Registry versions, git URLs, and non-string specifiers are not
      // in-repo build dependencies
      let Some(spec) = spec.as_str() else {
        continue;
      };
      if !spec.starts_with(WORKSPACE_MARKER) {
        continue;
      }

      edges.push(Edge {
        package: dep.to_string(),
        consumer: consumer.clone(),
      });
    }
  }

  Ok(edges)
}

/// Build the actual graph in one shot: collect edges, then fold.
pub fn build(
  entries: &[WorkspaceEntry],
  reader: &dyn ManifestReader,
  scope: &str,
  excluded: &BTreeSet<String>,
) -> DriftResult<ActualGraph> {
  Ok(ActualGraph::from_edges(collect_edges(entries, reader, scope, excluded)?))
}
