//! Per-iteration results and the sweep tally.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parameters::ParameterCombination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    ConfigGenerationFailed,
    SimulationFailed,
    /// The engine ran but at least one analysis step did not produce its table.
    CollectionPartialFailure,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::ConfigGenerationFailed => "config_generation_failed",
            RunStatus::SimulationFailed => "simulation_failed",
            RunStatus::CollectionPartialFailure => "collection_partial_failure",
        }
    }

    /// The engine ran to completion; collection may still have been partial.
    pub fn is_completed(self) -> bool {
        matches!(
            self,
            RunStatus::Success | RunStatus::CollectionPartialFailure
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one iteration. A finished iteration is either `Completed` or
/// stopped at the stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationStage {
    Pending,
    ConfigGenerating,
    Simulating,
    Collecting,
    Completed,
}

impl IterationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            IterationStage::Pending => "pending",
            IterationStage::ConfigGenerating => "config_generating",
            IterationStage::Simulating => "simulating",
            IterationStage::Collecting => "collecting",
            IterationStage::Completed => "completed",
        }
    }
}

impl fmt::Display for IterationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub iteration: u64,
    pub combination: ParameterCombination,
    pub status: RunStatus,
    pub stage: IterationStage,
    /// Captured stderr or the diagnostic of the failure.
    pub message: Option<String>,
    /// Analysis steps that did not produce their table.
    #[serde(default)]
    pub failed_steps: Vec<String>,
}

impl RunOutcome {
    pub fn success(iteration: u64, combination: ParameterCombination) -> Self {
        Self {
            iteration,
            combination,
            status: RunStatus::Success,
            stage: IterationStage::Completed,
            message: None,
            failed_steps: Vec::new(),
        }
    }

    pub fn config_failed(
        iteration: u64,
        combination: ParameterCombination,
        stage: IterationStage,
        message: impl Into<String>,
    ) -> Self {
        Self {
            iteration,
            combination,
            status: RunStatus::ConfigGenerationFailed,
            stage,
            message: Some(message.into()),
            failed_steps: Vec::new(),
        }
    }

    pub fn simulation_failed(
        iteration: u64,
        combination: ParameterCombination,
        message: impl Into<String>,
    ) -> Self {
        Self {
            iteration,
            combination,
            status: RunStatus::SimulationFailed,
            stage: IterationStage::Simulating,
            message: Some(message.into()),
            failed_steps: Vec::new(),
        }
    }

    pub fn partial_collection(
        iteration: u64,
        combination: ParameterCombination,
        failed_steps: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            iteration,
            combination,
            status: RunStatus::CollectionPartialFailure,
            stage: IterationStage::Completed,
            message: Some(message.into()),
            failed_steps,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// Totals reported at the end of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total_valid: u64,
    pub attempted: u64,
    /// Success plus partial collections.
    pub completed: u64,
    pub partial_collections: u64,
    pub config_failures: u64,
    pub simulation_failures: u64,
}

impl SweepSummary {
    pub fn new(total_valid: u64) -> Self {
        Self {
            total_valid,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &RunOutcome) {
        self.attempted += 1;
        match outcome.status {
            RunStatus::Success => self.completed += 1,
            RunStatus::CollectionPartialFailure => {
                self.completed += 1;
                self.partial_collections += 1;
            }
            RunStatus::ConfigGenerationFailed => self.config_failures += 1,
            RunStatus::SimulationFailed => self.simulation_failures += 1,
        }
    }

    pub fn failed(&self) -> u64 {
        self.config_failures + self.simulation_failures
    }
}

impl fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} iterations completed ({} with partial collection), {} config failures, {} simulation failures, {} valid combinations",
            self.completed,
            self.attempted,
            self.partial_collections,
            self.config_failures,
            self.simulation_failures,
            self.total_valid
        )
    }
}
