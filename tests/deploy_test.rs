//! Integration tests for `dkpkg deploy`
//!
//! Deploys go to a mirror destination inside the test workspace.

mod common;

use common::{stdout, TestProject};

fn packaged_project() -> TestProject {
    let project = TestProject::new();
    project.add_app("calcom");
    project.create_file("apps/calcom/calcom/conf/app.env", "A=1\n");
    project.create_file("apptags.json", "[]");
    project.order(&["calcom"]);
    let output = project.run(&["package"]);
    assert!(
        output.status.success(),
        "package failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    project
}

#[test]
fn test_deploy_to_mirror() {
    let project = packaged_project();
    let dest = project.path().join("mirror");

    let output = project.run(&["deploy", "calcom", "--dest", dest.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "deploy failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let remote = "mirror/www/dk_project/dk_app";
    assert_eq!(
        project.read_file(&format!("{remote}/apps.json")),
        project.read_file("pkg/apps.json")
    );
    assert_eq!(project.read_file(&format!("{remote}/apptags.json")), "[]");
    assert_eq!(
        project.read_file(&format!("{remote}/templates/calcom/conf/app.env")),
        "A=1\n"
    );
    assert!(project.file_exists(&format!("{remote}/templates/calcom/docker-compose.yml")));
    assert!(stdout(&output).contains("✓ Uploaded 4 files"));
}

#[test]
fn test_deploy_twice_succeeds() {
    let project = packaged_project();
    let dest = project.path().join("mirror");
    let dest = dest.to_str().unwrap();

    assert!(project.run(&["deploy", "calcom", "--dest", dest]).status.success());
    let output = project.run(&["deploy", "calcom", "--dest", dest]);

    assert!(output.status.success());
}

#[test]
fn test_dry_run_transfers_nothing() {
    let project = packaged_project();
    let dest = project.path().join("mirror");

    let output = project.run(&[
        "deploy",
        "calcom",
        "--dest",
        dest.to_str().unwrap(),
        "--dry-run",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Deploy plan"));
    assert!(text.contains("/www/dk_project/dk_app/templates/calcom"));
    assert!(!project.file_exists("mirror"));
}

#[test]
fn test_deploy_warns_about_unpackaged_outputs() {
    let project = TestProject::new();
    let dest = project.path().join("mirror");

    let output = project.run(&["deploy", "--dest", dest.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("apps.json not found, run 'dkpkg package' first"));
    assert!(text.contains("✓ Uploaded 0 files"));
}
