//! Integration tests for `workspace-drift check`

use crate::helpers::{TestWorkspace, run_drift, stderr_of, stdout_of};
use anyhow::Result;

#[test]
fn test_clean_workspace_passes() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/core", "workspace:*")])?;
  ws.write_cascade_map(&[("@acme/core", &["web"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  assert!(stdout_of(&output).contains("Workspace graph matches dependency-map.json — no drift found."));
  Ok(())
}

#[test]
fn test_undeclared_edge_reports_missing_and_missing_key() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/core", "workspace:*")])?;
  ws.write_cascade_map(&[])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;
  let stderr = stderr_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("MISSING: @acme/core -> web (workspace:* dep exists but not in dependency-map.json)"));
  assert!(stderr.contains("MISSING KEY: @acme/core has workspace:* consumers but no entry in dependency-map.json"));
  assert!(stderr.contains("2 drift issue(s) found."));
  Ok(())
}

#[test]
fn test_stale_entry_reports_stale() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/web", "packages/web", &[])?;
  ws.write_cascade_map(&[("@acme/core", &["web"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;
  let stderr = stderr_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("STALE: @acme/core -> web (in dependency-map.json but no workspace:* dep found)"));
  assert!(stderr.contains("1 drift issue(s) found."));
  Ok(())
}

#[test]
fn test_registry_specifier_is_not_an_edge() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/core", "^1.0.0")])?;
  ws.write_cascade_map(&[])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_shared_config_packages_are_excluded_by_default() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/eslint-config", "packages/eslint-config", &[])?;
  ws.add_package(
    "@acme/web",
    "packages/web",
    &[("@acme/eslint-config", "workspace:*")],
  )?;
  ws.write_cascade_map(&[])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_exclude_flag_silences_a_package() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/scripts", "packages/scripts", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/scripts", "workspace:*")])?;
  ws.write_cascade_map(&[])?;
  ws.install_fake_yarn()?;

  let drifting = run_drift(&ws, &["check"])?;
  assert_eq!(drifting.status.code(), Some(1));

  let excluded = run_drift(&ws, &["check", "--exclude", "@acme/scripts"])?;
  assert_eq!(excluded.status.code(), Some(0), "stderr: {}", stderr_of(&excluded));
  Ok(())
}

#[test]
fn test_dev_dependencies_participate() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/testkit", "packages/testkit", &[])?;
  ws.add_package_with_sections(
    "@acme/web",
    "packages/web",
    &[],
    &[("@acme/testkit", "workspace:^")],
  )?;
  ws.write_cascade_map(&[("@acme/testkit", &["web"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_member_without_manifest_is_skipped() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/core", "workspace:*")])?;
  ws.add_member_without_manifest("@acme/fixtures", "packages/fixtures")?;
  ws.write_cascade_map(&[("@acme/core", &["web"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_location_outside_packages_dir_keeps_its_name() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/site", "site", &[("@acme/core", "workspace:*")])?;
  ws.write_cascade_map(&[("@acme/core", &["site"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_json_report_shape() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/core", "workspace:*")])?;
  ws.write_cascade_map(&[])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check", "--json"])?;

  assert_eq!(output.status.code(), Some(1));
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(report["total_issues"], 2);
  assert_eq!(report["ok"], false);
  assert_eq!(report["discrepancies"][0]["kind"], "missing");
  assert_eq!(report["discrepancies"][0]["package"], "@acme/core");
  assert_eq!(report["discrepancies"][0]["consumer"], "web");
  assert_eq!(report["discrepancies"][1]["kind"], "missing_key");
  Ok(())
}

#[test]
fn test_missing_cascade_map_is_fatal_with_user_exit_code() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/web", "packages/web", &[])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr_of(&output).contains("dependency-map.json"));
  Ok(())
}

#[test]
fn test_malformed_cascade_map_is_fatal() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/web", "packages/web", &[])?;
  ws.write_raw_cascade_map("{ broken")?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr_of(&output).contains("Failed to parse cascade map"));
  Ok(())
}

#[test]
fn test_failing_lister_is_fatal_with_system_exit_code() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/web", "packages/web", &[])?;
  ws.write_cascade_map(&[])?;
  ws.install_failing_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr_of(&output).contains("Workspace enumeration failed"));
  Ok(())
}

#[test]
fn test_malformed_member_manifest_is_fatal() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_member_without_manifest("@acme/web", "packages/web")?;
  std::fs::write(ws.path.join("packages/web/package.json"), "{ not json")?;
  ws.write_cascade_map(&[])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr_of(&output).contains("Failed to parse manifest"));
  Ok(())
}

#[test]
fn test_explicit_scope_overrides_root_name() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@beta/core", "packages/core", &[])?;
  ws.add_package("@beta/web", "packages/web", &[("@beta/core", "workspace:*")])?;
  ws.write_cascade_map(&[("@beta/core", &["web"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check", "--scope", "@beta"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_all_drift_is_reported_in_one_run() -> Result<()> {
  let mut ws = TestWorkspace::new("@acme")?;
  ws.add_package("@acme/core", "packages/core", &[])?;
  ws.add_package("@acme/ui", "packages/ui", &[])?;
  ws.add_package("@acme/web", "packages/web", &[("@acme/core", "workspace:*")])?;
  ws.add_package("@acme/api", "packages/api", &[("@acme/ui", "workspace:*")])?;
  ws.write_cascade_map(&[("@acme/gone", &["worker"])])?;
  ws.install_fake_yarn()?;

  let output = run_drift(&ws, &["check"])?;
  let stderr = stderr_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("MISSING: @acme/core -> web"));
  assert!(stderr.contains("MISSING: @acme/ui -> api"));
  assert!(stderr.contains("STALE: @acme/gone -> worker"));
  assert!(stderr.contains("MISSING KEY: @acme/core"));
  assert!(stderr.contains("MISSING KEY: @acme/ui"));
  assert!(stderr.contains("5 drift issue(s) found."));
  Ok(())
}
