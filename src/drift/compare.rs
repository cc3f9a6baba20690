//! Drift comparator: actual graph vs declared cascade map
//!
//! Three passes, each pure: missing edges, stale edges, missing keys.
//! Output is grouped by pass, then package, then consumer. The comparator
//! never consults the filesystem and reports every discrepancy in one
//! run rather than stopping at the first.

use crate::drift::cascade::CascadeMap;
use crate::graph::ActualGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single point of drift between the graph and the cascade map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
  /// A workspace:* edge with no cascade entry behind it
  Missing { package: String, consumer: String },
  /// A cascade entry with no workspace:* edge behind it
  Stale { package: String, consumer: String },
  /// A consumed package absent from the cascade map entirely
  MissingKey { package: String },
}

impl fmt::Display for Discrepancy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Discrepancy::Missing { package, consumer } => {
        write!(
          f,
          "MISSING: {} -> {} (workspace:* dep exists but not in dependency-map.json)",
          package, consumer
        )
      }
      Discrepancy::Stale { package, consumer } => {
        write!(
          f,
          "STALE: {} -> {} (in dependency-map.json but no workspace:* dep found)",
          package, consumer
        )
      }
      Discrepancy::MissingKey { package } => {
        write!(
          f,
          "MISSING KEY: {} has workspace:* consumers but no entry in dependency-map.json",
          package
        )
      }
    }
  }
}

/// Report of all drift found in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
  pub total_issues: usize,
  pub ok: bool,
  pub discrepancies: Vec<Discrepancy>,
}

impl DriftReport {
  fn new(discrepancies: Vec<Discrepancy>) -> Self {
    Self {
      total_issues: discrepancies.len(),
      ok: discrepancies.is_empty(),
      discrepancies,
    }
  }
}

/// Compare the actual graph against the declared cascade map.
///
/// Packages in `excluded` are ignored in both directions, regardless of
/// which side lists them.
pub fn compare(actual: &ActualGraph, declared: &CascadeMap, excluded: &BTreeSet<String>) -> DriftReport {
  let mut discrepancies = Vec::new();

  // Pass 1: workspace:* edges the cascade map does not know about
  for (package, consumers) in actual.iter() {
    if excluded.contains(package) {
      continue;
    }
    let declared_consumers: BTreeSet<&str> = declared
      .consumers(package)
      .unwrap_or_default()
      .iter()
      .map(String::as_str)
      .collect();

    for consumer in consumers {
      if !declared_consumers.contains(consumer.as_str()) {
        discrepancies.push(Discrepancy::Missing {
          package: package.clone(),
          consumer: consumer.clone(),
        });
      }
    }
  }

  // Pass 2: cascade entries with no real dependency behind them
  for (package, consumers) in declared.iter() {
    if excluded.contains(package) {
      continue;
    }
    let actual_consumers = actual.consumers(package);

    for consumer in consumers {
      let known = actual_consumers.is_some_and(|set| set.contains(consumer));
      if !known {
        discrepancies.push(Discrepancy::Stale {
          package: package.clone(),
          consumer: consumer.clone(),
        });
      }
    }
  }

  // Pass 3: consumed packages the cascade map does not list at all.
  // Redundant with the per-consumer output of pass 1, but names the root
  // cause once per package.
  for (package, _) in actual.iter() {
    if excluded.contains(package) {
      continue;
    }
    if !declared.contains(package) {
      discrepancies.push(Discrepancy::MissingKey {
        package: package.clone(),
      });
    }
  }

  DriftReport::new(discrepancies)
}
