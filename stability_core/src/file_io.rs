//! # File I/O Module
//!
//! Reads condition files and writes reports:
//! - **Atomic saves**: write to `.tmp`, sync, rename, so an interrupted
//!   write never leaves a truncated report behind
//! - **Version validation**: reject condition files from an incompatible schema
//!
//! Both files are plain JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stability_core::file_io::{load_condition, save_report};
//! use stability_core::pipeline::compute_condition;
//! use std::path::Path;
//!
//! let input = load_condition(Path::new("departure.json"))?;
//! let report = compute_condition(&input)?;
//! save_report(&report, Path::new("departure.report.json"))?;
//! # Ok::<(), stability_core::errors::StabilityError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::errors::{CalcResult, StabilityError};
use crate::pipeline::{ConditionInput, ConditionReport, SCHEMA_VERSION};

/// Serialize `value` as pretty JSON and write it atomically to `path`.
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StabilityError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        StabilityError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        StabilityError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        StabilityError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StabilityError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Save a report as JSON with atomic write semantics.
pub fn save_report(report: &ConditionReport, path: &Path) -> CalcResult<()> {
    write_json_atomic(report, path)?;
    log::info!("report {} written to {}", report.run_id, path.display());
    Ok(())
}

/// Save a condition input as JSON with atomic write semantics.
pub fn save_condition(input: &ConditionInput, path: &Path) -> CalcResult<()> {
    write_json_atomic(input, path)
}

/// Load a condition from a JSON file.
///
/// # Returns
///
/// * `Ok(ConditionInput)` - Successfully loaded
/// * `Err(StabilityError::VersionMismatch)` - File schema is incompatible
/// * `Err(StabilityError::SerializationError)` - Invalid JSON, or a malformed curve table
/// * `Err(StabilityError::FileError)` - I/O error
pub fn load_condition(path: &Path) -> CalcResult<ConditionInput> {
    let mut file = File::open(path)
        .map_err(|e| StabilityError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| StabilityError::file_error("read", path.display().to_string(), e.to_string()))?;

    let input: ConditionInput =
        serde_json::from_str(&contents).map_err(|e| StabilityError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&input.schema_version)?;
    log::debug!("loaded condition '{}' from {}", input.name, path.display());

    Ok(input)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || StabilityError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor version may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compute_condition;
    use crate::ship::ShipProfile;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trimline_test_{}_{}.json", std::process::id(), name))
    }

    fn input() -> ConditionInput {
        let ship = ShipProfile::new("MV Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        ConditionInput::new("Departure", ship)
    }

    #[test]
    fn test_condition_round_trip() {
        let path = temp_path("condition");
        save_condition(&input(), &path).unwrap();
        let loaded = load_condition(&path).unwrap();
        assert_eq!(loaded.name, "Departure");
        assert_eq!(loaded.ship.length(), Some(100.0));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_path("report");
        let report = compute_condition(&input()).unwrap();
        save_report(&report, &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_condition(Path::new("/nonexistent/trimline/condition.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_condition(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.9.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
