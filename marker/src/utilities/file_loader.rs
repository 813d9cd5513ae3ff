//!
//! File Loader Utility
//!
//! This module provides utilities for reading the files a grading run consumes and for writing
//! the JSON reports it produces.
//!
//! # Functionality
//!
//! - Checks the existence, type and size of graded files, transcripts and stage reports.
//! - Loads a stage report as a [`StageInput`], turning absent or unparseable JSON into
//!   `Missing` / `Malformed` instead of an error.
//! - Writes reports as pretty JSON through a temporary file and a rename.
//!
//! # Error Handling
//!
//! Returns [`MarkerError`] variants for missing files, size violations, invalid JSON or failed
//! writes. The detailed cause is logged with `error!`; the returned message stays short.

use crate::error::MarkerError;
use crate::merge::StageInput;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{error, warn};
use util::paths::ensure_parent_dir;

/// Maximum allowed size for JSON files.
pub const MAX_JSON_SIZE: u64 = 2 * 1024 * 1024; // 2MB

/// Checks that a file exists, is a file, and (optionally) does not exceed a maximum size.
///
/// # Errors
///
/// Returns [`MarkerError::IoError`] if the file is missing, not a file or unreadable, and
/// [`MarkerError::FileTooLarge`] if it exceeds `max_size`.
pub fn check_file(path: &Path, max_size: Option<u64>) -> Result<(), MarkerError> {
    if !path.exists() {
        return Err(MarkerError::IoError("File not found".to_string()));
    }

    if !path.is_file() {
        let specific_error = format!("Not a file: {}", path.display());
        error!("{}", specific_error);
        return Err(MarkerError::IoError("Invalid file type".to_string()));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        let specific_error = format!("File unreadable: {} - {}", path.display(), e);
        error!("{}", specific_error);
        MarkerError::IoError("File unreadable".to_string())
    })?;

    if let Some(max) = max_size {
        if metadata.len() > max {
            let specific_error = format!(
                "File too large: {} ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                max
            );
            error!("{}", specific_error);
            return Err(MarkerError::FileTooLarge(format!(
                "{} bytes, max {} bytes",
                metadata.len(),
                max
            )));
        }
    }

    Ok(())
}

/// Read a UTF-8 text file (graded source or test transcript).
pub fn load_text(path: &Path) -> Result<String, MarkerError> {
    check_file(path, None)?;
    fs::read_to_string(path).map_err(|e| {
        let specific_error = format!("Failed to read {}: {}", path.display(), e);
        error!("{}", specific_error);
        MarkerError::IoError("File unreadable".to_string())
    })
}

/// Read and parse a JSON file, enforcing [`MAX_JSON_SIZE`].
pub fn load_json(path: &Path) -> Result<Value, MarkerError> {
    check_file(path, Some(MAX_JSON_SIZE))?;
    let bytes = fs::read(path).map_err(|e| {
        let specific_error = format!("Failed to read {}: {}", path.display(), e);
        error!("{}", specific_error);
        MarkerError::IoError("File unreadable".to_string())
    })?;
    serde_json::from_slice(&bytes).map_err(|e| MarkerError::InvalidJson(e.to_string()))
}

/// Load a previously written stage report.
///
/// An absent file is [`StageInput::Missing`]. Anything else that prevents reading a JSON
/// document (oversized, unreadable, unparseable) is [`StageInput::Malformed`] and logged
/// with the underlying message.
pub fn load_stage_input(path: &Path) -> StageInput {
    if !path.exists() {
        warn!("Stage report not found: {}", path.display());
        return StageInput::Missing;
    }
    match load_json(path) {
        Ok(value) => StageInput::Loaded(value),
        Err(e) => {
            warn!("Could not parse stage report {}: {}", path.display(), e);
            StageInput::Malformed(e.to_string())
        }
    }
}

/// Serialize `report` as pretty JSON and write it to `path`, creating parent directories.
///
/// The JSON is written to `<name>.tmp` next to the target and then renamed into place.
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<(), MarkerError> {
    ensure_parent_dir(path).map_err(|e| {
        error!("Failed to prepare directory for {}: {}", path.display(), e);
        MarkerError::IoError("Failed to prepare report directory".to_string())
    })?;

    let pretty = serde_json::to_string_pretty(report)
        .map_err(|e| MarkerError::InvalidJson(e.to_string()))?;

    let fname = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("report.json");
    let tmp = path.with_file_name(format!("{fname}.tmp"));
    {
        let mut f = fs::File::create(&tmp).map_err(|e| {
            error!("Failed to create {}: {}", tmp.display(), e);
            MarkerError::IoError("Failed to create temp file".to_string())
        })?;
        f.write_all(pretty.as_bytes())
            .and_then(|_| f.write_all(b"\n"))
            .and_then(|_| f.flush())
            .map_err(|e| {
                error!("Failed to write {}: {}", tmp.display(), e);
                MarkerError::IoError("Failed to write temp file".to_string())
            })?;
    }
    fs::rename(&tmp, path).map_err(|e| {
        error!("Failed to move {} into place: {}", tmp.display(), e);
        MarkerError::IoError("Failed to move temp file into place".to_string())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for the file loader utility.
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_text_fixture() {
        let text = load_text(&PathBuf::from("src/test_files/sources/stats_template.js")).unwrap();
        assert!(text.contains("fastify.get"));
    }

    #[test]
    fn test_load_text_missing() {
        let err = load_text(&PathBuf::from("src/test_files/sources/nope.js")).unwrap_err();
        assert_eq!(err, MarkerError::IoError("File not found".to_string()));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let err = check_file(&PathBuf::from("src/test_files"), None).unwrap_err();
        assert_eq!(err, MarkerError::IoError("Invalid file type".to_string()));
    }

    #[test]
    fn test_size_limit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.json");
        fs::write(&path, vec![b' '; 64]).unwrap();
        assert!(check_file(&path, Some(100)).is_ok());
        assert!(matches!(
            check_file(&path, Some(10)),
            Err(MarkerError::FileTooLarge(_))
        ));
    }

    #[test]
    fn test_stage_input_variants() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("api-report.json");
        assert_eq!(load_stage_input(&missing), StageInput::Missing);

        let bad = tmp.path().join("bad.json");
        fs::write(&bad, "{ \"pipelines\": ").unwrap();
        assert!(matches!(load_stage_input(&bad), StageInput::Malformed(_)));

        let good = tmp.path().join("good.json");
        fs::write(&good, r#"{ "pipelines": { "score": 10 } }"#).unwrap();
        assert_eq!(
            load_stage_input(&good),
            StageInput::Loaded(json!({ "pipelines": { "score": 10 } }))
        );
    }

    #[test]
    fn test_write_json_report_creates_dirs_and_cleans_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("report.json");
        write_json_report(&path, &json!({ "score": 1 })).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
        assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), json!({ "score": 1 }));
        assert!(!tmp.path().join("out").join("report.json.tmp").exists());
    }
}
