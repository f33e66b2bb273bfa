//! Application manifest (`app.json`) loading and validation

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::core::app::App;
use crate::core::failure::{Failure, FailureKind};

/// Outcome of reading one manifest
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestLoad {
    /// Parsed JSON object
    Loaded(Map<String, Value>),
    /// File does not exist
    Missing,
    /// File exists but is not a JSON object
    Malformed(String),
    /// File exists but could not be read
    Unreadable(String),
}

/// Read and parse a manifest file
pub fn load_manifest(path: &Path) -> ManifestLoad {
    if !path.is_file() {
        return ManifestLoad::Missing;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return ManifestLoad::Missing,
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return ManifestLoad::Malformed(format!("not valid UTF-8: {e}"))
        }
        Err(e) => return ManifestLoad::Unreadable(e.to_string()),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => ManifestLoad::Loaded(map),
        Ok(_) => ManifestLoad::Malformed("top-level value must be a JSON object".to_string()),
        Err(e) => ManifestLoad::Malformed(e.to_string()),
    }
}

/// Check that an application's manifest exists and parses
///
/// Callers skip excluded-class applications entirely.
pub fn validate_app_info(app: &App) -> Result<(), Failure> {
    let path = app.manifest_path();
    match load_manifest(&path) {
        ManifestLoad::Loaded(_) => {
            tracing::debug!("Manifest OK: {}", path.display());
            Ok(())
        }
        ManifestLoad::Missing => Err(Failure::new(
            &app.name,
            FailureKind::MissingResource,
            format!("missing app info {}", path.display()),
        )),
        ManifestLoad::Malformed(reason) => Err(Failure::new(
            &app.name,
            FailureKind::MalformedData,
            format!("invalid app info {} - {reason}", path.display()),
        )),
        ManifestLoad::Unreadable(reason) => Err(Failure::new(
            &app.name,
            FailureKind::IoFailure,
            format!("cannot read app info {} - {reason}", path.display()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app_with_manifest(content: Option<&str>) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("demo");
        std::fs::create_dir_all(&app_dir).unwrap();
        if let Some(content) = content {
            std::fs::write(app_dir.join("app.json"), content).unwrap();
        }
        (dir, App::from_dir(app_dir))
    }

    #[test]
    fn test_load_valid_manifest() {
        let (_dir, app) = app_with_manifest(Some(r#"{"name":"demo","versions":[]}"#));

        match load_manifest(&app.manifest_path()) {
            ManifestLoad::Loaded(map) => assert_eq!(map["name"], "demo"),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_manifest() {
        let (_dir, app) = app_with_manifest(None);
        assert_eq!(load_manifest(&app.manifest_path()), ManifestLoad::Missing);
    }

    #[test]
    fn test_load_manifest_directory_counts_as_missing() {
        let (_dir, app) = app_with_manifest(None);
        std::fs::create_dir(app.manifest_path()).unwrap();
        assert_eq!(load_manifest(&app.manifest_path()), ManifestLoad::Missing);
    }

    #[test]
    fn test_load_malformed_manifest() {
        let (_dir, app) = app_with_manifest(Some("{\"name\": "));
        assert!(matches!(
            load_manifest(&app.manifest_path()),
            ManifestLoad::Malformed(_)
        ));
    }

    #[test]
    fn test_load_non_object_manifest() {
        let (_dir, app) = app_with_manifest(Some("[1, 2, 3]"));
        assert!(matches!(
            load_manifest(&app.manifest_path()),
            ManifestLoad::Malformed(_)
        ));
    }

    #[test]
    fn test_validate_ok() {
        let (_dir, app) = app_with_manifest(Some("{}"));
        assert!(validate_app_info(&app).is_ok());
    }

    #[test]
    fn test_validate_distinguishes_missing_and_malformed() {
        let (_dir, missing) = app_with_manifest(None);
        let failure = validate_app_info(&missing).unwrap_err();
        assert_eq!(failure.kind, FailureKind::MissingResource);
        assert_eq!(failure.subject, "demo");
        assert!(failure.reason.starts_with("missing app info"));

        let (_dir, malformed) = app_with_manifest(Some("not json"));
        let failure = validate_app_info(&malformed).unwrap_err();
        assert_eq!(failure.kind, FailureKind::MalformedData);
        assert!(failure.reason.starts_with("invalid app info"));
    }
}
