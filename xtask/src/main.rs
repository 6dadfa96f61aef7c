use std::fs;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ramp-merge sweep workspace",
    long_about = "A unified CLI for running parameter sweeps, benchmarks,\n\
                  and CI checks in the ramp-merge sweep workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ramp_sweep binary; extra arguments are passed through
    Sweep {
        /// Built-in axes to sweep
        #[arg(long, value_enum, default_value_t = Preset::Default)]
        preset: Preset,
        /// Arguments forwarded to ramp_sweep (after `--`)
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Count the valid combinations of each preset without running the engine
    DryRun,
    /// Run the coarse sweep example
    Example,
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Coarse,
    Minimal,
}

impl Preset {
    const ALL: [Preset; 3] = [Preset::Default, Preset::Coarse, Preset::Minimal];

    fn as_arg(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Coarse => "coarse",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Dry runs of the sweep binary
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

const BENCH_ARGS: [&str; 4] = ["bench", "--package", "sim_experiments", "--bench"];
const BENCH_NAME: &str = "enumeration";

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(error) => {
            eprintln!("failed to execute {program}: {error}");
            exit(1);
        }
    }
}

fn run(program: &str, args: &[&str]) {
    let status = spawn(program, args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run("cargo", args);
}

fn run_git(args: &[&str]) {
    run("git", args);
}

fn run_sweep(extra: &[&str]) {
    let mut args = vec!["run", "-p", "sim_experiments", "--bin", "ramp_sweep", "--"];
    args.extend_from_slice(extra);
    run_cargo(&args);
}

fn run_bench(extra: &[&str]) {
    let mut args = BENCH_ARGS.to_vec();
    args.push(BENCH_NAME);
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test sim_sweep_core");
    run_cargo(&["test", "-p", "sim_sweep_core"]);

    step("Test sim_core");
    run_cargo(&["test", "-p", "sim_core"]);

    step("Test sim_experiments");
    run_cargo(&["test", "-p", "sim_experiments"]);
}

fn ci_examples() {
    step("Print effective configuration");
    run_sweep(&["--print-config"]);

    for preset in Preset::ALL {
        step(&format!("Dry run ({} preset)", preset.as_arg()));
        run_sweep(&["--preset", preset.as_arg(), "--dry-run"]);
    }

    step("Build examples");
    run_cargo(&["build", "-p", "sim_experiments", "--examples"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep { preset, args } => {
            let mut forwarded = vec!["--preset", preset.as_arg()];
            forwarded.extend(args.iter().map(String::as_str));
            run_sweep(&forwarded);
        }
        Commands::DryRun => {
            for preset in Preset::ALL {
                run_sweep(&["--preset", preset.as_arg(), "--dry-run"]);
            }
        }
        Commands::Example => {
            run_cargo(&[
                "run",
                "-p",
                "sim_experiments",
                "--example",
                "parameter_sweep",
            ]);
        }
        Commands::Bench => run_bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(error) = fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove target/criterion: {error}");
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
