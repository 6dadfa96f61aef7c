//! Sequential parameter sweep for the ramp-merge traffic scenario.
//!
//! Enumerates every valid combination of highway speed, ramp speed, mainline
//! flow and ramp flow, runs the traffic engine once per combination and files
//! the analysis tables of each run into its own workspace directory.
//!
//! # Quick Start
//!
//! ```no_run
//! use sim_experiments::{parameter_spaces, SweepConfig, SweepOrchestrator};
//!
//! let config = SweepConfig {
//!     axes: parameter_spaces::coarse_axes(),
//!     ..SweepConfig::default()
//! };
//! let summary = SweepOrchestrator::from_config(config).run()?;
//! println!("{summary}");
//! # Ok::<(), sim_experiments::SweepError>(())
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: lazy enumeration of valid combinations
//! - [`parameter_spaces`]: built-in axes
//! - [`runner`]: the sweep orchestrator
//! - [`workspace`] and [`collector`]: per-iteration output isolation
//! - [`export`]: ledger, manifest and final summary
//! - [`config`]: JSON configuration and fatal errors

pub mod collector;
pub mod config;
pub mod export;
pub mod logging;
pub mod outcome;
pub mod parameter_spaces;
pub mod parameters;
pub mod runner;
pub mod workspace;

pub use collector::{AnalysisCollector, CollectionReport, ResultCollector};
pub use config::{SweepConfig, SweepError};
pub use outcome::{IterationStage, RunOutcome, RunStatus, SweepSummary};
pub use parameters::{ParameterCombination, ParameterSpace};
pub use runner::SweepOrchestrator;
pub use workspace::IterationWorkspace;
