//! Per-iteration result directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sim_sweep_core::WorkspaceLayout;
use tracing::debug;

use crate::outcome::RunOutcome;

pub const OUTCOME_FILE_NAME: &str = "outcome.json";

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    WriteOutcome {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode outcome: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Directory owned by exactly one iteration. Never removed by the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationWorkspace {
    iteration: u64,
    path: PathBuf,
}

impl IterationWorkspace {
    /// Create (or reuse) the directory for `iteration`. Existing content is
    /// left untouched.
    pub fn create(layout: &WorkspaceLayout, iteration: u64) -> Result<Self, WorkspaceError> {
        let path = layout.iteration_dir(iteration);
        fs::create_dir_all(&path).map_err(|source| WorkspaceError::Create {
            path: path.clone(),
            source,
        })?;
        debug!(iteration, path = %path.display(), "workspace ready");
        Ok(Self { iteration, path })
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name, also used as the analysis `sim_id`.
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.iteration.to_string())
    }

    /// Record how the iteration ended, replacing any earlier marker.
    pub fn write_outcome(&self, outcome: &RunOutcome) -> Result<PathBuf, WorkspaceError> {
        let path = self.path.join(OUTCOME_FILE_NAME);
        let json = serde_json::to_string_pretty(outcome)?;
        fs::write(&path, json).map_err(|source| WorkspaceError::WriteOutcome {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::RunStatus;
    use crate::parameters::ParameterCombination;

    fn combo() -> ParameterCombination {
        ParameterCombination {
            highway_speed: 40.0,
            ramp_speed: 20.0,
            mainline_flow: 1000,
            ramp_flow: 300,
        }
    }

    #[test]
    fn create_is_idempotent_and_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::with_root(dir.path());

        let first = IterationWorkspace::create(&layout, 3).unwrap();
        fs::write(first.path().join("edge_density.csv"), "begin\n").unwrap();
        let second = IterationWorkspace::create(&layout, 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.path(), dir.path().join("iteration_3"));
        assert!(second.path().join("edge_density.csv").exists());
    }

    #[test]
    fn label_uses_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout {
            index_width: 4,
            ..WorkspaceLayout::with_root(dir.path())
        };
        let workspace = IterationWorkspace::create(&layout, 12).unwrap();
        assert_eq!(workspace.label(), "iteration_0012");
    }

    #[test]
    fn outcome_marker_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let workspace =
            IterationWorkspace::create(&WorkspaceLayout::with_root(dir.path()), 1).unwrap();
        let outcome = RunOutcome::simulation_failed(1, combo(), "Error: no route");

        let path = workspace.write_outcome(&outcome).unwrap();

        let stored: RunOutcome =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(stored.status, RunStatus::SimulationFailed);
        assert_eq!(stored.message.as_deref(), Some("Error: no route"));
    }

    #[test]
    fn create_fails_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("results");
        fs::write(&blocker, "not a directory").unwrap();

        let error = IterationWorkspace::create(&WorkspaceLayout::with_root(&blocker), 1)
            .expect_err("root is a file");
        assert!(matches!(error, WorkspaceError::Create { .. }));
    }
}
