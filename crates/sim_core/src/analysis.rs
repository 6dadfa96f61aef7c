//! Post-run transforms from engine output XML to CSV tables.
//!
//! Each [`TransformStep`] reads one or more engine documents and writes a
//! single table. Steps are independent: one failing step leaves the others
//! runnable.

mod config_summary;
mod edge_data;
mod summary;
mod table;
mod tripinfo;
mod xml;

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::EngineLayout;
use crate::scenario::ScenarioConfig;

pub use table::{write_table, Table};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("<{element}> in {} has no '{attribute}' attribute", path.display())]
    MissingAttribute {
        path: PathBuf,
        element: String,
        attribute: String,
    },
    #[error("<{element}> in {} has non-numeric {attribute}=\"{value}\"", path.display())]
    InvalidNumber {
        path: PathBuf,
        element: String,
        attribute: String,
        value: String,
    },
    #[error("failed to write table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Engine outputs and scenario documents the transforms read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInputs {
    pub summary: PathBuf,
    pub tripinfo: PathBuf,
    pub edgedata: PathBuf,
    pub edges_file: PathBuf,
    pub routes_file: PathBuf,
}

impl AnalysisInputs {
    pub fn new(engine: &EngineLayout, scenario: &ScenarioConfig) -> Self {
        Self {
            summary: engine.summary_output.clone(),
            tripinfo: engine.tripinfo_output.clone(),
            edgedata: engine.edgedata_output.clone(),
            edges_file: scenario.edges_file.clone(),
            routes_file: scenario.routes_file.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformStep {
    EdgeData,
    SummarySteps,
    TripInfo,
    ConfigMeanSpeed,
}

impl TransformStep {
    /// Execution order.
    pub const ALL: [TransformStep; 4] = [
        TransformStep::EdgeData,
        TransformStep::SummarySteps,
        TransformStep::TripInfo,
        TransformStep::ConfigMeanSpeed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformStep::EdgeData => "edge_data",
            TransformStep::SummarySteps => "summary_steps",
            TransformStep::TripInfo => "tripinfo",
            TransformStep::ConfigMeanSpeed => "config_mean_speed",
        }
    }

    pub fn output_file_name(self) -> &'static str {
        match self {
            TransformStep::EdgeData => "edge_density.csv",
            TransformStep::SummarySteps => "summary_steps.csv",
            TransformStep::TripInfo => "tripinfo_summary.csv",
            TransformStep::ConfigMeanSpeed => "mean_speed_with_config.csv",
        }
    }

    /// Build this step's table without touching the filesystem output.
    pub fn build_table(self, inputs: &AnalysisInputs, sim_id: &str) -> Result<Table, AnalysisError> {
        match self {
            TransformStep::EdgeData => edge_data::edge_density_table(&inputs.edgedata),
            TransformStep::SummarySteps => summary::summary_steps_table(&inputs.summary),
            TransformStep::TripInfo => tripinfo::tripinfo_table(&inputs.tripinfo),
            TransformStep::ConfigMeanSpeed => config_summary::mean_speed_table(
                sim_id,
                &inputs.edges_file,
                &inputs.routes_file,
                &inputs.summary,
            ),
        }
    }

    /// Build the table and write it to `out_dir`, returning the written path.
    pub fn run(
        self,
        inputs: &AnalysisInputs,
        sim_id: &str,
        out_dir: &Path,
    ) -> Result<PathBuf, AnalysisError> {
        let table = self.build_table(inputs, sim_id)?;
        let path = out_dir.join(self.output_file_name());
        write_table(&path, &table)?;
        debug!(step = self.name(), rows = table.rows.len(), path = %path.display(), "wrote analysis table");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_run_in_fixed_order_with_distinct_outputs() {
        let names: Vec<_> = TransformStep::ALL
            .iter()
            .map(|step| step.output_file_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "edge_density.csv",
                "summary_steps.csv",
                "tripinfo_summary.csv",
                "mean_speed_with_config.csv"
            ]
        );
    }

    #[test]
    fn inputs_follow_engine_and_scenario_paths() {
        let inputs = AnalysisInputs::new(&EngineLayout::default(), &ScenarioConfig::default());
        assert_eq!(inputs.summary, PathBuf::from("Output/summary.xml"));
        assert_eq!(inputs.edgedata, PathBuf::from("Output/edgeData.xml"));
        assert_eq!(inputs.routes_file, PathBuf::from("ramp/ramp.rou.xml"));
    }

    #[test]
    fn missing_input_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = AnalysisInputs {
            summary: dir.path().join("summary.xml"),
            tripinfo: dir.path().join("tripinfo.xml"),
            edgedata: dir.path().join("edgeData.xml"),
            edges_file: dir.path().join("ramp.edg.xml"),
            routes_file: dir.path().join("ramp.rou.xml"),
        };

        let error = TransformStep::TripInfo
            .run(&inputs, "iteration_1", dir.path())
            .unwrap_err();
        assert!(matches!(error, AnalysisError::Io { .. }));
        assert!(error.to_string().contains("tripinfo.xml"));
        assert!(!dir.path().join("tripinfo_summary.csv").exists());
    }
}
