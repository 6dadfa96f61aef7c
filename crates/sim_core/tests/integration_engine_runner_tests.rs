#![cfg(unix)]

mod support;

use std::fs;
use std::path::PathBuf;

use sim_core::analysis::{AnalysisInputs, TransformStep};
use sim_core::engine::{EngineError, EngineLayout, EngineRunner, SimulationRunner};

use support::engine_outputs::layouts_in;

/// Runs `sh -c <script> --summary-output <a> --tripinfo-output <b> --edgedata-output <c>`,
/// so the script sees the output paths as `$1`, `$3` and `$5`.
fn shell_engine(engine: EngineLayout, script: &str) -> EngineLayout {
    EngineLayout {
        program: "sh".to_string(),
        config_file: PathBuf::from(script),
        ..engine
    }
}

#[test]
fn real_process_writes_outputs_that_analysis_can_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (scenario, engine) = layouts_in(dir.path());
    fs::write(&scenario.edges_file, r#"<edges><edge id="main_0" priority="3" speed="30"/></edges>"#)
        .unwrap();
    fs::write(&scenario.routes_file, r#"<routes><flow id="mainFlow" vehsPerHour="900"/></routes>"#)
        .unwrap();
    let engine = shell_engine(
        engine,
        r#"printf '<summary><step time="0" meanSpeed="12.5"/></summary>' > "$1"
printf '<tripinfos/>' > "$3"
printf '<meandata/>' > "$5""#,
    );

    let runner = EngineRunner::new(engine.clone());
    runner.run_simulation().expect("shell engine should succeed");

    let inputs = AnalysisInputs::new(&engine, &scenario);
    let table = TransformStep::ConfigMeanSpeed
        .build_table(&inputs, "iteration_1")
        .expect("config summary");
    assert_eq!(table.cell(0, "meanSpeed_avg"), Some("12.5"));
    assert_eq!(table.cell(0, "vehsPerHour_total"), Some("900.0"));
}

#[test]
fn failing_process_reports_exit_code_and_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, engine) = layouts_in(dir.path());
    let engine = shell_engine(engine, "echo 'Error: No lanes in edge' >&2; exit 4");

    let error = EngineRunner::new(engine)
        .run_simulation()
        .expect_err("exit 4 should fail");

    match error {
        EngineError::NonZeroExit { code, stderr } => {
            assert_eq!(code, Some(4));
            assert_eq!(stderr.trim(), "Error: No lanes in edge");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, engine) = layouts_in(dir.path());
    let engine = EngineLayout {
        program: "definitely-not-an-installed-engine".to_string(),
        ..engine
    };

    let error = EngineRunner::new(engine).run_simulation().unwrap_err();
    assert!(matches!(error, EngineError::Spawn { .. }));
}

#[test]
fn previous_run_outputs_do_not_survive_a_silent_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_, engine) = layouts_in(dir.path());
    support::engine_outputs::write_engine_outputs(&engine);
    let engine = shell_engine(engine, "exit 0");

    EngineRunner::new(engine.clone()).run_simulation().unwrap();

    for output in engine.outputs() {
        assert!(!output.exists(), "{} should be cleared", output.display());
    }
}
