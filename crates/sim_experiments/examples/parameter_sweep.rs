//! Example: coarse sweep of the ramp-merge scenario.
//!
//! This example demonstrates how to:
//! 1. Select a pre-defined set of axes
//! 2. Inspect the parameter space before running anything
//! 3. Run the sweep sequentially against the installed engine
//! 4. Read back the totals
//!
//! Run it from the directory that holds `ramp/ramp.sumocfg`. To use a
//! different grid, change the function call in main().

use sim_experiments::{parameter_spaces, ParameterSpace, SweepConfig, SweepOrchestrator};
use sim_sweep_core::normalize_axes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    sim_experiments::logging::init_logging("info")?;

    // Select which axes to use:
    // - default_axes(): full-resolution grid (the binary's default)
    // - coarse_axes(): 5 m/s speed steps, wide flow steps
    // - minimal_axes(): two runs
    let axes = parameter_spaces::coarse_axes();

    let space = ParameterSpace::from_axes(normalize_axes(&axes)?);
    println!(
        "Axes: {} highway speeds, {} ramp speeds, {} mainline flows, {} ramp flows",
        space.highway_speeds().len(),
        space.ramp_speeds().len(),
        space.mainline_flows().len(),
        space.ramp_flows().len()
    );
    println!(
        "{} valid combinations (highway speed must exceed ramp speed)",
        space.count_valid()
    );
    if let Some(first) = space.combinations().next() {
        println!("First run: {first:?}");
    }

    let config = SweepConfig {
        axes,
        ..SweepConfig::default()
    };
    println!("Results go to {}", config.results.root().display());

    let summary = SweepOrchestrator::from_config(config).run()?;

    println!("\n=== Sweep Summary ===");
    println!("Attempted: {}", summary.attempted);
    println!("Completed: {}", summary.completed);
    println!("  with partial collection: {}", summary.partial_collections);
    println!("Config failures: {}", summary.config_failures);
    println!("Simulation failures: {}", summary.simulation_failures);

    Ok(())
}
