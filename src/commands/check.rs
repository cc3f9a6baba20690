//! Check command: report drift and set the exit code

use crate::core::config::CheckConfig;
use crate::core::error::DriftResult;
use crate::drift::{CascadeMap, DriftReport, compare};
use crate::graph::actual;
use crate::workspace::{FsManifestReader, WorkspaceLister, YarnLister};
use std::path::PathBuf;

/// Run the check command
pub fn run_check(
  root: Option<PathBuf>,
  map: PathBuf,
  scope: Option<String>,
  exclude: Vec<String>,
  json: bool,
) -> DriftResult<()> {
  let config = CheckConfig::resolve(root, scope, exclude)?;

  // Fatal inputs first: a bad cascade map aborts before any comparison
  let declared = CascadeMap::load(&config.map_path(&map))?;

  let lister = YarnLister::new(&config.root);
  let entries = lister.list()?;

  let reader = FsManifestReader::new(&config.root);
  let graph = actual::build(&entries, &reader, &config.scope, &config.excluded)?;

  let report = compare(&graph, &declared, &config.excluded);

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(&report);
  }

  // Drift is normal output, not an error; only the exit code carries it
  if !report.ok {
    std::process::exit(1);
  }

  Ok(())
}

fn print_report(report: &DriftReport) {
  for discrepancy in &report.discrepancies {
    eprintln!("{}", discrepancy);
  }

  if report.ok {
    println!("Workspace graph matches dependency-map.json — no drift found.");
  } else {
    eprintln!("\n{} drift issue(s) found.", report.total_issues);
  }
}
