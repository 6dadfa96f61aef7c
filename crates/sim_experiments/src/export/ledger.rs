use std::fs::File;
use std::path::{Path, PathBuf};

use sim_core::format::decimal;

use super::ExportError;
use crate::outcome::RunOutcome;

pub const LEDGER_COLUMNS: [&str; 9] = [
    "iteration",
    "highway_speed",
    "ramp_speed",
    "mainline_flow",
    "ramp_flow",
    "status",
    "stage",
    "failed_steps",
    "message",
];

/// Streaming CSV of every attempted iteration. Each row is flushed as soon
/// as it is written, so an interrupted sweep still leaves a readable ledger.
pub struct SweepLedger {
    path: PathBuf,
    wtr: csv::Writer<File>,
}

impl SweepLedger {
    /// Create (truncating) the ledger and write its header.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        let mut ledger = Self {
            path,
            wtr: csv::Writer::from_writer(file),
        };
        ledger.write_row(LEDGER_COLUMNS.iter().map(|c| c.to_string()).collect())?;
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, outcome: &RunOutcome) -> Result<(), ExportError> {
        let combo = &outcome.combination;
        self.write_row(vec![
            outcome.iteration.to_string(),
            decimal(combo.highway_speed),
            decimal(combo.ramp_speed),
            combo.mainline_flow.to_string(),
            combo.ramp_flow.to_string(),
            outcome.status.to_string(),
            outcome.stage.to_string(),
            outcome.failed_steps.join(";"),
            outcome
                .message
                .as_deref()
                .map(single_line)
                .unwrap_or_default(),
        ])
    }

    fn write_row(&mut self, row: Vec<String>) -> Result<(), ExportError> {
        self.wtr.write_record(&row).map_err(|source| ExportError::Csv {
            path: self.path.clone(),
            source,
        })?;
        self.wtr.flush().map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Engine stderr is often multi-line; keep ledger rows on one line.
fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
