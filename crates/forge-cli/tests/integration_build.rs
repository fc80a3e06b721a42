//! Integration tests for the build, clean and task commands.
//!
//! These exercise the commands against real fixture projects on disk,
//! mirroring the scale at which `MakePlatform` itself is exercised from
//! `forge-core`, but through the CLI's command layer.

use std::fs;

use forge_cli::commands::{build, clean, task};
use tempfile::TempDir;

fn write_fixture_project(root: &std::path::Path) {
    let config_dir = root.join(".enb");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("make.toml"),
        r#"
        languages = ["en"]

        [node."bundles/common"]
        techs = ["js", "css"]
        settings = { sources = ["bundles/common/common.js"] }

        [node."bundles/common".mode.production]
        settings = { minify = true }

        [[node_mask]]
        mask = "bundles/*"
        settings = { out_dir = "dist" }

        [[task]]
        name = "lint"
        run = "true {args}"
        "#,
    )
    .unwrap();

    let bundle_dir = root.join("bundles/common");
    fs::create_dir_all(&bundle_dir).unwrap();
    fs::write(bundle_dir.join("common.js"), "console.log('hi');").unwrap();
}

#[tokio::test]
async fn build_then_clean_round_trip() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    let build_result = build::execute(temp.path(), None, vec![]).await;
    assert!(build_result.is_ok(), "build should succeed: {build_result:?}");

    let clean_result = clean::execute(temp.path(), None, vec![]).await;
    assert!(clean_result.is_ok(), "clean should succeed: {clean_result:?}");
}

#[tokio::test]
async fn build_specific_target_succeeds() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    let result = build::execute(temp.path(), None, vec!["bundles/common".to_string()]).await;
    assert!(result.is_ok(), "build of a known target should succeed: {result:?}");
}

#[tokio::test]
async fn build_unknown_target_fails() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    let result = build::execute(temp.path(), None, vec!["bundles/missing".to_string()]).await;
    assert!(result.is_err(), "build of an unresolvable target should fail");
}

#[tokio::test]
async fn build_with_production_mode_applies_mode_overrides() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    let result = build::execute(temp.path(), Some("production".to_string()), vec![]).await;
    assert!(result.is_ok(), "build under an explicit mode should succeed: {result:?}");
}

#[tokio::test]
async fn task_runs_registered_manifest_task() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    let result = task::execute(temp.path(), None, "lint".to_string(), vec![]).await;
    assert!(result.is_ok(), "registered task should succeed: {result:?}");
}

#[tokio::test]
async fn task_with_unknown_name_fails() {
    let temp = TempDir::new().unwrap();
    write_fixture_project(temp.path());

    let result = task::execute(temp.path(), None, "does-not-exist".to_string(), vec![]).await;
    assert!(result.is_err(), "unknown task name should fail");
}

#[tokio::test]
async fn build_without_config_dir_fails() {
    let temp = TempDir::new().unwrap();

    let result = build::execute(temp.path(), None, vec![]).await;
    assert!(result.is_err(), "build without a .enb directory should fail");
}
