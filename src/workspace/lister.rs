//! Workspace enumeration via `yarn workspaces list --json`
//!
//! The enumeration sits behind a trait so the graph builder can be driven
//! from an in-memory list in tests; the subprocess lives only here and is
//! wired in at the command layer.

use crate::core::error::{DriftError, DriftResult, EnumerationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

const YARN_LIST_COMMAND: &str = "yarn workspaces list --json";

/// One workspace member as reported by the package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
  pub name: String,
  pub location: String,
}

/// Source of workspace membership records
pub trait WorkspaceLister {
  fn list(&self) -> DriftResult<Vec<WorkspaceEntry>>;
}

/// Real lister: shells out to yarn once per invocation
pub struct YarnLister {
  root: PathBuf,
}

impl YarnLister {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }
}

impl WorkspaceLister for YarnLister {
  fn list(&self) -> DriftResult<Vec<WorkspaceEntry>> {
    let output = Command::new("yarn")
      .current_dir(&self.root)
      .args(["workspaces", "list", "--json"])
      .output()
      .map_err(|e| {
        DriftError::Enumeration(EnumerationError::CommandFailed {
          command: YARN_LIST_COMMAND.to_string(),
          stderr: e.to_string(),
        })
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(DriftError::Enumeration(EnumerationError::CommandFailed {
        command: YARN_LIST_COMMAND.to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_workspace_list(&stdout)
  }
}

/// Parse newline-delimited `{"location": ..., "name": ...}` records.
///
/// The root package (location `.`) is not a cascade participant and is
/// dropped here, before the graph builder ever sees it.
pub fn parse_workspace_list(raw: &str) -> DriftResult<Vec<WorkspaceEntry>> {
  let mut entries = Vec::new();

  for line in raw.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let entry: WorkspaceEntry = serde_json::from_str(line).map_err(|e| {
      DriftError::Enumeration(EnumerationError::OutputParse {
        line: line.to_string(),
        message: e.to_string(),
      })
    })?;

    if entry.location == "." {
      continue;
    }

    entries.push(entry);
  }

  Ok(entries)
}
