//! External traffic engine invocation.
//!
//! The engine is an opaque program run once per iteration with a fixed
//! configuration file and three declared output files. Exit code 0 means the
//! outputs are ready; anything else is a failed run with its standard error
//! kept for diagnostics.

mod process;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use process::{ProcessCommand, ProcessOutput, ProcessRunner, SystemProcessRunner};

pub const DEFAULT_ENGINE_PROGRAM: &str = "sumo";
pub const DEFAULT_ENGINE_CONFIG: &str = "ramp/ramp.sumocfg";
pub const DEFAULT_SUMMARY_OUTPUT: &str = "Output/summary.xml";
pub const DEFAULT_TRIPINFO_OUTPUT: &str = "Output/tripinfo.xml";
pub const DEFAULT_EDGEDATA_OUTPUT: &str = "Output/edgeData.xml";

/// Command-line contract of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLayout {
    pub program: String,
    pub config_file: PathBuf,
    /// Aggregate per-step summary.
    pub summary_output: PathBuf,
    /// Per-trip summary.
    pub tripinfo_output: PathBuf,
    /// Per-edge interval summary.
    pub edgedata_output: PathBuf,
    /// Appended after the declared outputs, e.g. `--no-step-log`.
    pub extra_args: Vec<String>,
}

impl Default for EngineLayout {
    fn default() -> Self {
        Self {
            program: DEFAULT_ENGINE_PROGRAM.to_string(),
            config_file: PathBuf::from(DEFAULT_ENGINE_CONFIG),
            summary_output: PathBuf::from(DEFAULT_SUMMARY_OUTPUT),
            tripinfo_output: PathBuf::from(DEFAULT_TRIPINFO_OUTPUT),
            edgedata_output: PathBuf::from(DEFAULT_EDGEDATA_OUTPUT),
            extra_args: Vec::new(),
        }
    }
}

impl EngineLayout {
    pub fn command(&self) -> ProcessCommand {
        ProcessCommand::new(&self.program)
            .arg("-c")
            .arg(path_arg(&self.config_file))
            .arg("--summary-output")
            .arg(path_arg(&self.summary_output))
            .arg("--tripinfo-output")
            .arg(path_arg(&self.tripinfo_output))
            .arg("--edgedata-output")
            .arg(path_arg(&self.edgedata_output))
            .args(self.extra_args.iter().cloned())
    }

    pub fn outputs(&self) -> [&Path; 3] {
        [
            &self.summary_output,
            &self.tripinfo_output,
            &self.edgedata_output,
        ]
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to prepare engine output {}: {source}", path.display())]
    PrepareOutputs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("engine exited with {}", exit_label(*code))]
    NonZeroExit { code: Option<i32>, stderr: String },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl EngineError {
    /// Captured standard error of a failed run, if the engine got that far.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            EngineError::NonZeroExit { stderr, .. } => Some(stderr.as_str()),
            _ => None,
        }
    }
}

/// Streams of a successful engine run.
#[derive(Debug, Clone, Default)]
pub struct EngineRun {
    pub stdout: String,
    pub stderr: String,
}

/// Runs the engine once against the current scenario documents.
pub trait SimulationRunner {
    fn run_simulation(&self) -> Result<EngineRun, EngineError>;
}

/// [`SimulationRunner`] that launches the engine as a subprocess and waits
/// for it without a timeout.
#[derive(Debug, Clone, Default)]
pub struct EngineRunner<P = SystemProcessRunner> {
    layout: EngineLayout,
    process: P,
}

impl EngineRunner<SystemProcessRunner> {
    pub fn new(layout: EngineLayout) -> Self {
        Self::with_process(layout, SystemProcessRunner)
    }
}

impl<P: ProcessRunner> EngineRunner<P> {
    pub fn with_process(layout: EngineLayout, process: P) -> Self {
        Self { layout, process }
    }

    pub fn layout(&self) -> &EngineLayout {
        &self.layout
    }

    /// Remove outputs left by an earlier run so a run that exits 0 without
    /// writing a file cannot hand stale data to the analysis steps.
    fn prepare_outputs(&self) -> Result<(), EngineError> {
        for path in self.layout.outputs() {
            let prepare = |source| EngineError::PrepareOutputs {
                path: path.to_path_buf(),
                source,
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(prepare)?;
            }
            match fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "removed stale engine output"),
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => return Err(prepare(error)),
            }
        }
        Ok(())
    }
}

impl<P: ProcessRunner> SimulationRunner for EngineRunner<P> {
    fn run_simulation(&self) -> Result<EngineRun, EngineError> {
        self.prepare_outputs()?;

        let command = self.layout.command();
        debug!(command = %command.display(), "starting engine");
        let output = self
            .process
            .execute(&command)
            .map_err(|source| EngineError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if !output.success() {
            return Err(EngineError::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(EngineRun {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
