use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sim_experiments::logging::init_logging;
use sim_experiments::{parameter_spaces, SweepConfig, SweepOrchestrator};
use sim_sweep_core::{AxesConfig, AxisSpec};

#[derive(Parser)]
#[command(
    name = "ramp_sweep",
    about = "Sweep speed limits and flow rates of the ramp-merge scenario",
    long_about = "Runs the traffic engine once per valid combination of highway speed,\n\
                  ramp speed, mainline flow and ramp flow (highway faster than ramp),\n\
                  and files each run's analysis tables into its own directory.\n\n\
                  Axes accept `start:stop:step` (stop included) or `v1,v2,...`."
)]
struct Cli {
    /// JSON sweep configuration; omitted sections use the built-in defaults
    #[arg(long, env = "RAMP_SWEEP_CONFIG")]
    config: Option<PathBuf>,
    /// Built-in axes to start from (replaces the axes of --config)
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// Highway speed axis in m/s
    #[arg(long, value_name = "AXIS")]
    highway_speed: Option<AxisSpec>,
    /// Ramp speed axis in m/s
    #[arg(long, value_name = "AXIS")]
    ramp_speed: Option<AxisSpec>,
    /// Mainline flow axis in vehicles per hour
    #[arg(long, value_name = "AXIS")]
    mainline_flow: Option<AxisSpec>,
    /// Ramp flow axis in vehicles per hour
    #[arg(long, value_name = "AXIS")]
    ramp_flow: Option<AxisSpec>,
    /// Directory that receives the per-iteration workspaces
    #[arg(long)]
    results_dir: Option<PathBuf>,
    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
    /// Only report how many combinations would run
    #[arg(long)]
    dry_run: bool,
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Full-resolution grid
    Default,
    /// Coarse grid with 5 m/s speed steps
    Coarse,
    /// Two runs, for checking the engine installation
    Minimal,
}

impl Preset {
    fn axes(self) -> AxesConfig {
        match self {
            Preset::Default => parameter_spaces::default_axes(),
            Preset::Coarse => parameter_spaces::coarse_axes(),
            Preset::Minimal => parameter_spaces::minimal_axes(),
        }
    }
}

fn effective_config(cli: &Cli) -> Result<SweepConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };

    if let Some(preset) = cli.preset {
        config.axes = preset.axes();
    }
    let overrides = [
        (&cli.highway_speed, &mut config.axes.highway_speed),
        (&cli.ramp_speed, &mut config.axes.ramp_speed),
        (&cli.mainline_flow, &mut config.axes.mainline_flow),
        (&cli.ramp_flow, &mut config.axes.ramp_flow),
    ];
    for (flag, axis) in overrides {
        if let Some(spec) = flag {
            *axis = spec.clone();
        }
    }
    if let Some(dir) = &cli.results_dir {
        config.results.root_dir = dir.clone();
    }
    if cli.no_progress {
        config.show_progress = false;
    }
    Ok(config)
}

fn try_main(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = effective_config(&cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let orchestrator = SweepOrchestrator::from_config(config);
    if cli.dry_run {
        let space = orchestrator.parameter_space()?;
        println!("{} valid combinations", space.count_valid());
        return Ok(());
    }

    let summary = orchestrator.run()?;
    println!("{summary}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("warning: logging not initialized: {e}");
    }

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
