use std::fs;
use std::path::Path;

use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

macro_rules! pnpm_licscan {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("pnpm-licscan")
    };
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dirs");
    fs::write(path, content).expect("write file");
}

fn create_workspace() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let root = dir.path();

    write(root, "pnpm-workspace.yaml", "packages:\n  - 'packages/*'\n");
    write(
        root,
        "package.json",
        r#"{"name": "cli-fixture", "private": true, "packageManager": "pnpm@8.15.4"}"#,
    );
    write(
        root,
        "pnpm-lock.yaml",
        r"lockfileVersion: '6.0'

importers:

  .:
    devDependencies:
      prettier:
        specifier: ^3.2.0
        version: 3.2.5

  packages/api:
    dependencies:
      express:
        specifier: ^4.18.0
        version: 4.18.2

  packages/worker:
    dependencies:
      express:
        specifier: ^4.18.0
        version: 4.18.2
      mystery:
        specifier: ^0.1.0
        version: 0.1.0
",
    );
    write(
        root,
        "packages/api/package.json",
        r#"{"name": "@cli/api", "version": "1.0.0"}"#,
    );
    write(
        root,
        "packages/worker/package.json",
        r#"{"name": "@cli/worker", "version": "1.1.0"}"#,
    );
    write(
        root,
        "node_modules/.pnpm/express@4.18.2/node_modules/express/package.json",
        r#"{"name": "express", "version": "4.18.2", "license": "MIT"}"#,
    );
    write(
        root,
        "node_modules/.pnpm/prettier@3.2.5/node_modules/prettier/package.json",
        r#"{"name": "prettier", "version": "3.2.5", "license": "MIT"}"#,
    );

    dir
}

fn scan_json(dir: &TempDir, extra_args: &[&str]) -> serde_json::Value {
    let output = pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .args(extra_args)
        .output()
        .expect("run pnpm-licscan");

    assert!(output.status.success(), "scan failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn scan_prints_json_by_default() {
    let dir = create_workspace();

    let json = scan_json(&dir, &[]);

    let paths: Vec<_> = json["projects"]
        .as_array()
        .expect("projects array")
        .iter()
        .map(|p| p["path"].as_str().expect("path string"))
        .collect();
    assert_eq!(paths, vec![".", "packages/api", "packages/worker"]);
    assert_eq!(json["metadata"]["lockfileVersion"], "6.0");
    assert_eq!(json["metadata"]["pnpmVersion"], "8.15.4");
}

#[test]
fn scan_summary_counts_unique_packages() {
    let dir = create_workspace();

    let json = scan_json(&dir, &[]);

    assert_eq!(json["summary"]["totalDependencies"], 4);
    assert_eq!(json["summary"]["uniqueDependencies"], 3);
    assert_eq!(json["summary"]["licenseCounts"]["MIT"], 2);
    assert_eq!(json["summary"]["licenseCounts"]["UNKNOWN"], 1);
    assert_eq!(json["summary"]["unknownLicenseCount"], 1);
}

#[test]
fn scan_without_dev_dependencies() {
    let dir = create_workspace();

    let json = scan_json(&dir, &["--no-dev", "--jobs", "1"]);

    assert_eq!(json["projects"][0]["devDependencies"], serde_json::json!([]));
    assert_eq!(json["summary"]["totalDependencies"], 3);
}

#[test]
fn scan_plain_format() {
    let dir = create_workspace();

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .args(["--format", "plain"])
        .assert()
        .success()
        .stdout(contains("Scanned 3 projects"))
        .stdout(contains("packages/api (@cli/api@1.0.0): 1 dependency, 0 dev dependencies"))
        .stdout(contains("Unknown licenses:"))
        .stdout(contains("mystery@0.1.0 (packages/worker)"));
}

#[test]
fn scan_missing_lockfile_suggests_install() {
    let dir = create_workspace();
    fs::remove_file(dir.path().join("pnpm-lock.yaml")).expect("remove lockfile");

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("error: license scan failed"))
        .stderr(contains("caused by: lockfile not found"))
        .stderr(contains("pnpm install"));
}

#[test]
fn scan_old_lockfile_suggests_upgrade() {
    let dir = create_workspace();
    write(dir.path(), "pnpm-lock.yaml", "lockfileVersion: 5.4\n");

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("unsupported lockfile version '5.4'"))
        .stderr(contains("upgrade pnpm"));
}

#[test]
fn scan_malformed_importers_is_not_reported_as_stale() {
    let dir = create_workspace();
    write(
        dir.path(),
        "pnpm-lock.yaml",
        "lockfileVersion: '9.0'\nimporters: [packages/api, packages/worker]\n",
    );

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("field 'importers' must be a mapping"))
        .stderr(contains("pnpm install").not());
}

#[test]
fn scan_stale_lockfile_names_project() {
    let dir = create_workspace();
    write(
        dir.path(),
        "packages/new-service/package.json",
        r#"{"name": "@cli/new-service"}"#,
    );

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("packages/new-service"))
        .stderr(contains("pnpm install"));
}

#[test]
fn scan_outside_workspace_fails() {
    let dir = TempDir::new().expect("create temp dir");

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("pnpm-workspace.yaml"));
}

#[test]
fn zero_jobs_is_rejected() {
    let dir = create_workspace();

    pnpm_licscan!()
        .arg("scan")
        .arg("-C")
        .arg(dir.path())
        .args(["--jobs", "0"])
        .assert()
        .failure();
}

#[test]
fn verbose_logs_go_to_stderr() {
    let dir = create_workspace();

    let output = pnpm_licscan!()
        .arg("scan")
        .arg("-v")
        .arg("-C")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("run pnpm-licscan");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("starting license scan"));
    serde_json::from_slice::<serde_json::Value>(&output.stdout).expect("stdout stays JSON");
}
