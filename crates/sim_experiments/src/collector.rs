//! Moves analysis tables of a finished run into its workspace.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sim_core::analysis::{AnalysisInputs, TransformStep};
use tracing::{debug, warn};

use crate::workspace::IterationWorkspace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Final locations of the tables that made it into the workspace.
    pub relocated: Vec<PathBuf>,
    pub failures: Vec<StepFailure>,
}

impl CollectionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_steps(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.step.clone()).collect()
    }

    /// `step: message` pairs joined with `; `.
    pub fn failure_message(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.step, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn fail(&mut self, step: &str, message: impl Into<String>) {
        self.failures.push(StepFailure {
            step: step.to_string(),
            message: message.into(),
        });
    }
}

/// Collects the outputs of the engine run that just finished.
///
/// Never fails as a whole: each step's problem is reported in the returned
/// [`CollectionReport`] and the remaining steps still run.
pub trait ResultCollector {
    fn collect(&self, workspace: &IterationWorkspace) -> CollectionReport;
}

/// Runs every [`TransformStep`] into a staging directory, then moves each
/// table into the iteration workspace.
#[derive(Debug, Clone)]
pub struct AnalysisCollector {
    inputs: AnalysisInputs,
    staging_dir: PathBuf,
    steps: Vec<TransformStep>,
}

impl AnalysisCollector {
    pub fn new(inputs: AnalysisInputs, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            staging_dir: staging_dir.into(),
            steps: TransformStep::ALL.to_vec(),
        }
    }

    pub fn with_steps(mut self, steps: Vec<TransformStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    fn run_step(
        &self,
        step: TransformStep,
        sim_id: &str,
        workspace: &IterationWorkspace,
    ) -> Result<PathBuf, String> {
        let staged = self.staging_dir.join(step.output_file_name());
        remove_if_present(&staged)
            .map_err(|e| format!("cannot clear staged {}: {e}", staged.display()))?;

        let produced = step
            .run(&self.inputs, sim_id, &self.staging_dir)
            .map_err(|e| e.to_string())?;

        let target = workspace.path().join(step.output_file_name());
        relocate(&produced, &target).map_err(|e| {
            format!(
                "cannot move {} to {}: {e}",
                produced.display(),
                target.display()
            )
        })?;
        Ok(target)
    }
}

impl ResultCollector for AnalysisCollector {
    fn collect(&self, workspace: &IterationWorkspace) -> CollectionReport {
        let mut report = CollectionReport::default();
        if let Err(error) = fs::create_dir_all(&self.staging_dir) {
            for step in &self.steps {
                report.fail(
                    step.name(),
                    format!("cannot create {}: {error}", self.staging_dir.display()),
                );
            }
            return report;
        }

        let sim_id = workspace.label();
        for &step in &self.steps {
            match self.run_step(step, &sim_id, workspace) {
                Ok(path) => {
                    debug!(iteration = workspace.iteration(), step = step.name(), path = %path.display(), "collected");
                    report.relocated.push(path);
                }
                Err(message) => {
                    warn!(iteration = workspace.iteration(), step = step.name(), %message, "analysis step failed");
                    report.fail(step.name(), message);
                }
            }
        }
        report
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
        _ => Ok(()),
    }
}

/// Rename, falling back to copy and remove when the two paths live on
/// different filesystems.
fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
