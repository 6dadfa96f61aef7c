use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contract::ValidationError;

pub const DEFAULT_RESULTS_ROOT: &str = "Analysis/analysis_results";
pub const DEFAULT_DIR_PREFIX: &str = "iteration_";

/// Naming scheme for per-iteration result directories.
///
/// Iteration `7` with the defaults lands in `Analysis/analysis_results/iteration_7`;
/// with `index_width = 4` it becomes `iteration_0007`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkspaceLayout {
    pub root_dir: PathBuf,
    pub dir_prefix: String,
    pub index_width: usize,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_RESULTS_ROOT),
            dir_prefix: DEFAULT_DIR_PREFIX.to_string(),
            index_width: 0,
        }
    }
}

impl WorkspaceLayout {
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    pub fn dir_name(&self, iteration: u64) -> String {
        format!(
            "{}{iteration:0width$}",
            self.dir_prefix,
            width = self.index_width
        )
    }

    pub fn iteration_dir(&self, iteration: u64) -> PathBuf {
        self.root_dir.join(self.dir_name(iteration))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir_prefix.trim().is_empty() {
            return Err(ValidationError::new("dir_prefix cannot be empty"));
        }
        if self.dir_prefix.contains(['/', '\\']) || self.dir_prefix.contains("..") {
            return Err(ValidationError::new(format!(
                "dir_prefix '{}' must be a plain directory name",
                self.dir_prefix
            )));
        }
        if self.index_width > 20 {
            return Err(ValidationError::new(
                "index_width cannot exceed 20 digits",
            ));
        }
        Ok(())
    }
}
