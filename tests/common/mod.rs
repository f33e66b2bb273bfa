//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary workspace with an `apps/` root and provides
/// utilities for setting up applications and running `dkpkg` against it.
pub struct TestProject {
    /// Temporary directory for the workspace
    pub dir: TempDir,
}

impl TestProject {
    /// Create an empty workspace with an `apps/` directory
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        project.create_dir("apps");
        project
    }

    /// Get the path to the workspace root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the workspace
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the workspace
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Read raw bytes from the workspace
    pub fn read_bytes(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write the ordering file
    pub fn order(&self, apps: &[&str]) {
        let content = serde_json::to_string(apps).expect("Failed to encode order");
        self.create_file("app_order.json", &content);
    }

    /// Add a complete application: icon, manifest and primary version
    pub fn add_app(&self, name: &str) {
        self.create_file(&format!("apps/{name}/ico-dkapp_{name}.png"), "png");
        self.create_file(
            &format!("apps/{name}/app.json"),
            &format!(r#"{{"name":"{name}","versions":[{{"v":"1.0"}}]}}"#),
        );
        self.create_file(
            &format!("apps/{name}/{name}/docker-compose.yml"),
            "services: {}\n",
        );
    }

    /// Run `dkpkg` with the workspace as `--root`
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dkpkg"))
            .args(args)
            .arg("--root")
            .arg(self.path())
            .env_remove("DKPKG_ROOT")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute dkpkg")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry names of a zip archive in the workspace
pub fn zip_entries(project: &TestProject, name: &str) -> Vec<String> {
    let file = std::fs::File::open(project.path().join(name)).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    (0..archive.len())
        .map(|i| archive.by_index(i).expect("Failed to read entry").name().to_string())
        .collect()
}

/// Stdout of a finished command as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
