//! Sequential sweep driver.
//!
//! For every valid combination, in enumeration order, one iteration goes
//! through `Pending → ConfigGenerating → Simulating → Collecting` and ends
//! either `Completed` or failed at the stage that broke. Per-iteration
//! failures become a [`RunOutcome`]; they never stop the sweep.

use std::fs;

use indicatif::{ProgressBar, ProgressStyle};
use sim_core::analysis::{AnalysisInputs, TransformStep};
use sim_core::engine::{EngineRunner, SimulationRunner};
use sim_core::format::decimal;
use sim_core::scenario::{ConfigEmitter, XmlConfigEmitter};
use sim_sweep_core::{axes_fingerprint, normalize_axes};
use tracing::{debug, info, warn};

use crate::collector::{AnalysisCollector, ResultCollector};
use crate::config::{SweepConfig, SweepError};
use crate::export::{
    write_manifest, write_summary, ExportError, RunManifest, SpeedSummary, SweepLedger,
    LEDGER_FILE_NAME, SPEED_SUMMARY_FILE_NAME,
};
use crate::outcome::{IterationStage, RunOutcome, RunStatus, SweepSummary};
use crate::parameters::{ParameterCombination, ParameterSpace};
use crate::workspace::IterationWorkspace;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Owns the configuration and the three collaborators of a sweep.
pub struct SweepOrchestrator<E = XmlConfigEmitter, S = EngineRunner, C = AnalysisCollector> {
    config: SweepConfig,
    emitter: E,
    simulator: S,
    collector: C,
}

impl SweepOrchestrator {
    /// Orchestrator with the XML emitter, the engine subprocess and the
    /// analysis collector staging into the results root.
    pub fn from_config(config: SweepConfig) -> Self {
        let emitter = XmlConfigEmitter::new(config.scenario.clone());
        let simulator = EngineRunner::new(config.engine.clone());
        let collector = AnalysisCollector::new(
            AnalysisInputs::new(&config.engine, &config.scenario),
            config.results.root(),
        );
        Self::new(config, emitter, simulator, collector)
    }
}

impl<E, S, C> SweepOrchestrator<E, S, C>
where
    E: ConfigEmitter,
    S: SimulationRunner,
    C: ResultCollector,
{
    pub fn new(config: SweepConfig, emitter: E, simulator: S, collector: C) -> Self {
        Self {
            config,
            emitter,
            simulator,
            collector,
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Validate the configuration and expand its axes.
    pub fn parameter_space(&self) -> Result<ParameterSpace, SweepError> {
        self.config.validate()?;
        let axes = normalize_axes(&self.config.axes)?;
        Ok(ParameterSpace::from_axes(axes))
    }

    /// Run every valid combination once.
    ///
    /// Only setup problems are returned as errors: invalid configuration or
    /// axes, or a results root / ledger that cannot be created. With zero
    /// valid combinations nothing is created and an empty summary is returned.
    pub fn run(&self) -> Result<SweepSummary, SweepError> {
        self.config.validate()?;
        let axes = normalize_axes(&self.config.axes)?;
        let fingerprint = axes_fingerprint(&axes);
        let space = ParameterSpace::from_axes(axes);

        let total = space.count_valid();
        info!(total, "valid parameter combinations");
        if total == 0 {
            info!("no combination has highway speed above ramp speed; nothing to run");
            return Ok(SweepSummary::new(0));
        }

        let root = self.config.results.root();
        fs::create_dir_all(root).map_err(|source| SweepError::ResultsRoot {
            path: root.to_path_buf(),
            source,
        })?;
        write_manifest(root, &RunManifest::new(&self.config, fingerprint, total))?;
        let mut ledger = SweepLedger::create(root.join(LEDGER_FILE_NAME))?;
        let mut speeds = SpeedSummary::create(root.join(SPEED_SUMMARY_FILE_NAME))?;

        let progress = self.progress_bar(total);
        let mut summary = SweepSummary::new(total);

        for (position, combination) in space.combinations().enumerate() {
            let iteration = position as u64 + 1;
            let label = describe(&combination);
            match &progress {
                Some(bar) => bar.set_message(progress_message(iteration, total, &label)),
                None => info!(iteration, total, "{label}"),
            }

            let outcome = self.run_iteration(iteration, combination);
            let ledger_result = ledger.append(&outcome);
            let speeds_result = self.append_speed_row(&mut speeds, &outcome);
            let report = || {
                log_outcome(&outcome, &label);
                if let Err(error) = &ledger_result {
                    warn!(iteration, %error, "could not append to sweep ledger");
                }
                if let Err(error) = &speeds_result {
                    warn!(iteration, %error, "could not append to speed summary");
                }
            };
            match &progress {
                Some(bar) => bar.suspend(report),
                None => report(),
            }
            summary.record(&outcome);

            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = &progress {
            bar.finish_with_message("done");
        }
        if let Err(error) = write_summary(root, &summary) {
            warn!(%error, "could not write sweep result");
        }
        info!(%summary, "sweep finished");
        Ok(summary)
    }

    /// Drive one combination through its lifecycle and record the outcome in
    /// its workspace.
    pub fn run_iteration(&self, iteration: u64, combination: ParameterCombination) -> RunOutcome {
        let workspace = match IterationWorkspace::create(&self.config.results, iteration) {
            Ok(workspace) => workspace,
            Err(error) => {
                return RunOutcome::config_failed(
                    iteration,
                    combination,
                    IterationStage::Pending,
                    error.to_string(),
                )
            }
        };

        let outcome = self.drive(iteration, combination, &workspace);
        if let Err(error) = workspace.write_outcome(&outcome) {
            warn!(iteration, %error, "could not write outcome marker");
        }
        outcome
    }

    fn drive(
        &self,
        iteration: u64,
        combination: ParameterCombination,
        workspace: &IterationWorkspace,
    ) -> RunOutcome {
        debug!(iteration, stage = %IterationStage::ConfigGenerating, "writing scenario documents");
        if let Err(error) = self.emitter.emit(&combination.scenario_params()) {
            return RunOutcome::config_failed(
                iteration,
                combination,
                IterationStage::ConfigGenerating,
                error.to_string(),
            );
        }

        debug!(iteration, stage = %IterationStage::Simulating, "running engine");
        if let Err(error) = self.simulator.run_simulation() {
            let message = match error.stderr().map(str::trim) {
                Some(stderr) if !stderr.is_empty() => format!("{error}: {stderr}"),
                _ => error.to_string(),
            };
            return RunOutcome::simulation_failed(iteration, combination, message);
        }

        debug!(iteration, stage = %IterationStage::Collecting, "collecting outputs");
        let report = self.collector.collect(workspace);
        if report.is_complete() {
            RunOutcome::success(iteration, combination)
        } else {
            RunOutcome::partial_collection(
                iteration,
                combination,
                report.failed_steps(),
                report.failure_message(),
            )
        }
    }

    /// Copy the run's configuration + mean speed row into the sweep-wide table.
    fn append_speed_row(
        &self,
        speeds: &mut SpeedSummary,
        outcome: &RunOutcome,
    ) -> Result<(), ExportError> {
        let step = TransformStep::ConfigMeanSpeed;
        if !outcome.is_completed() || outcome.failed_steps.iter().any(|s| s == step.name()) {
            return Ok(());
        }
        let table = self
            .config
            .results
            .iteration_dir(outcome.iteration)
            .join(step.output_file_name());
        if !table.exists() {
            return Ok(());
        }
        speeds.append_table(&table).map(|_| ())
    }

    fn progress_bar(&self, total: u64) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Some(bar)
    }
}

/// Bar message naming the running iteration by its 1-based index.
fn progress_message(iteration: u64, total: u64, label: &str) -> String {
    format!("{iteration}/{total} {label}")
}

fn describe(combination: &ParameterCombination) -> String {
    format!(
        "highway_speed={} ramp_speed={} mainline_flow={} ramp_flow={}",
        decimal(combination.highway_speed),
        decimal(combination.ramp_speed),
        combination.mainline_flow,
        combination.ramp_flow
    )
}

fn log_outcome(outcome: &RunOutcome, label: &str) {
    let iteration = outcome.iteration;
    let message = outcome.message.as_deref().unwrap_or_default();
    match outcome.status {
        RunStatus::Success => debug!(iteration, "iteration completed"),
        RunStatus::CollectionPartialFailure => warn!(
            iteration,
            failed_steps = %outcome.failed_steps.join(","),
            "iteration completed with partial collection ({label}): {message}"
        ),
        RunStatus::ConfigGenerationFailed | RunStatus::SimulationFailed => warn!(
            iteration,
            status = %outcome.status,
            stage = %outcome.stage,
            "iteration failed ({label}): {message}"
        ),
    }
}
