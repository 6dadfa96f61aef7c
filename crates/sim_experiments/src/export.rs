//! Sweep-level records written to the results root.
//!
//! - `sweep_summary.csv`: one ledger row per attempted iteration, flushed as
//!   the sweep goes.
//! - `run_manifest.json`: effective configuration and axes fingerprint,
//!   written before the first iteration.
//! - `sweep_result.json`: final [`SweepSummary`].
//! - `sim_summary_min.csv`: configuration and mean speed of every collected
//!   run, appended as runs finish.

use std::io;
use std::path::{Path, PathBuf};

use crate::outcome::SweepSummary;

#[path = "export/ledger.rs"]
mod ledger;
#[path = "export/manifest.rs"]
mod manifest;
#[path = "export/speed_summary.rs"]
mod speed_summary;

pub use ledger::{SweepLedger, LEDGER_COLUMNS};
pub use manifest::RunManifest;
pub use speed_summary::SpeedSummary;

pub const LEDGER_FILE_NAME: &str = "sweep_summary.csv";
pub const MANIFEST_FILE_NAME: &str = "run_manifest.json";
pub const SUMMARY_FILE_NAME: &str = "sweep_result.json";
pub const SPEED_SUMMARY_FILE_NAME: &str = "sim_summary_min.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write ledger {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Write the run manifest into `results_root`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_manifest(
    results_root: impl AsRef<Path>,
    manifest: &RunManifest<'_>,
) -> Result<PathBuf, ExportError> {
    let path = results_root.as_ref().join(MANIFEST_FILE_NAME);
    manifest::write_json(&path, manifest)?;
    Ok(path)
}

/// Write the final sweep totals into `results_root`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_summary(
    results_root: impl AsRef<Path>,
    summary: &SweepSummary,
) -> Result<PathBuf, ExportError> {
    let path = results_root.as_ref().join(SUMMARY_FILE_NAME);
    manifest::write_json(&path, summary)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SweepConfig;

    #[test]
    fn test_manifest_carries_fingerprint_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SweepConfig::default();
        let manifest = RunManifest::new(&config, "abc123".to_string(), 42);

        let path = write_manifest(dir.path(), &manifest).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["axes_fingerprint"], "abc123");
        assert_eq!(json["total_valid"], 42);
        assert_eq!(json["config"]["engine"]["program"], "sumo");
    }

    #[test]
    fn test_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let summary = SweepSummary {
            total_valid: 3,
            attempted: 3,
            completed: 2,
            partial_collections: 1,
            config_failures: 0,
            simulation_failures: 1,
        };

        let path = write_summary(dir.path(), &summary).unwrap();

        let stored: SweepSummary =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(stored, summary);
    }
}
