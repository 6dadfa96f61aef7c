use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::ExportError;
use crate::config::SweepConfig;

/// Everything needed to tell two sweeps apart, written before the first run.
#[derive(Debug, Serialize)]
pub struct RunManifest<'a> {
    pub crate_version: &'static str,
    pub axes_fingerprint: String,
    pub total_valid: u64,
    pub config: &'a SweepConfig,
}

impl<'a> RunManifest<'a> {
    pub fn new(config: &'a SweepConfig, axes_fingerprint: String, total_valid: u64) -> Self {
        Self {
            crate_version: env!("CARGO_PKG_VERSION"),
            axes_fingerprint,
            total_valid,
            config,
        }
    }
}

pub(crate) fn write_json(path: &Path, value: &impl Serialize) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}
