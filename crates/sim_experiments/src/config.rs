//! Sweep configuration and fatal sweep errors.
//!
//! Every section falls back to the built-in behavior, so an empty JSON object
//! is a complete configuration:
//!
//! ```json
//! {
//!   "axes": { "highway_speed": "25:129.5:0.5", "ramp_speed": [15, 20], ... },
//!   "scenario": { "edges_file": "ramp/ramp.edg.xml", ... },
//!   "engine": { "program": "sumo", ... },
//!   "results": { "root_dir": "Analysis/analysis_results", ... },
//!   "show_progress": true
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sim_core::engine::EngineLayout;
use sim_core::scenario::ScenarioConfig;
use sim_sweep_core::{AxesConfig, ParseError, ValidationError, WorkspaceLayout};

use crate::export::ExportError;
use crate::parameter_spaces::default_axes;

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Axis(#[from] ParseError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
    #[error("failed to create results root {}: {source}", path.display())]
    ResultsRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn default_show_progress() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_axes")]
    pub axes: AxesConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub engine: EngineLayout,
    #[serde(default)]
    pub results: WorkspaceLayout,
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            axes: default_axes(),
            scenario: ScenarioConfig::default(),
            engine: EngineLayout::default(),
            results: WorkspaceLayout::default(),
            show_progress: default_show_progress(),
        }
    }
}

impl SweepConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SweepError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SweepError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.engine.program.trim().is_empty() {
            return Err(ValidationError::new("engine.program cannot be empty"));
        }
        if self.scenario.flow_end_s <= self.scenario.flow_begin_s {
            return Err(ValidationError::new(format!(
                "scenario.flow_end_s ({}) must be after flow_begin_s ({})",
                self.scenario.flow_end_s, self.scenario.flow_begin_s
            )));
        }
        self.results.validate()
    }
}
