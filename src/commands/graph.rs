//! Graph command: print the derived workspace:* dependency graph
//!
//! Handy for regenerating or auditing dependency-map.json by hand.

use crate::core::config::CheckConfig;
use crate::core::error::DriftResult;
use crate::graph::{ActualGraph, actual};
use crate::workspace::{FsManifestReader, WorkspaceLister, YarnLister};
use std::path::PathBuf;

/// Run the graph command
pub fn run_graph(root: Option<PathBuf>, scope: Option<String>, exclude: Vec<String>, json: bool) -> DriftResult<()> {
  let config = CheckConfig::resolve(root, scope, exclude)?;

  let lister = YarnLister::new(&config.root);
  let entries = lister.list()?;

  let reader = FsManifestReader::new(&config.root);
  let graph = actual::build(&entries, &reader, &config.scope, &config.excluded)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&graph)?);
  } else {
    print_graph(&graph, &config.scope);
  }

  Ok(())
}

fn print_graph(graph: &ActualGraph, scope: &str) {
  if graph.is_empty() {
    println!("No workspace:* dependencies under {} found.", scope);
    return;
  }

  for (package, consumers) in graph.iter() {
    println!("📦 {}", package);
    for consumer in consumers {
      println!("   - {}", consumer);
    }
  }
}
