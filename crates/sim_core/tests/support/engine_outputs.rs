#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sim_core::analysis::AnalysisInputs;
use sim_core::engine::EngineLayout;
use sim_core::scenario::{ConfigEmitter, ScenarioConfig, ScenarioParams, XmlConfigEmitter};

pub const SUMMARY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<summary>
    <step time="0.00" loaded="2" inserted="2" running="2" waiting="0" ended="0" meanWaitingTime="0.00" meanTravelTime="-1.00" meanSpeed="28.50" halting="0"/>
    <step time="1.00" loaded="3" inserted="3" running="3" waiting="0" ended="0" meanWaitingTime="0.00" meanTravelTime="-1.00" meanSpeed="27.50" halting="0"/>
</summary>
"#;

pub const TRIPINFO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tripinfos>
    <tripinfo id="mainFlow.0" depart="0.00" arrival="33.00" duration="33.00" routeLength="850.40" waitingTime="0.00"/>
    <tripinfo id="rampFlow.0" depart="0.00" arrival="41.00" duration="41.00" routeLength="640.10" waitingTime="2.00"/>
</tripinfos>
"#;

pub const EDGE_DATA_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<meandata>
    <interval begin="0.00" end="600.00" id="edgeData">
        <edge id="main_0" density="3.20" speed="28.10" entered="301" left="299"/>
        <edge id="ramp_0" density="1.05" speed="11.40" entered="66" left="66"/>
    </interval>
</meandata>
"#;

/// Scenario and engine paths rooted in `dir`, mirroring the default layout.
pub fn layouts_in(dir: &Path) -> (ScenarioConfig, EngineLayout) {
    fs::create_dir_all(dir.join("ramp")).expect("ramp dir");
    let scenario = ScenarioConfig {
        edges_file: dir.join("ramp/ramp.edg.xml"),
        routes_file: dir.join("ramp/ramp.rou.xml"),
        ..ScenarioConfig::default()
    };
    let engine = EngineLayout {
        config_file: dir.join("ramp/ramp.sumocfg"),
        summary_output: dir.join("Output/summary.xml"),
        tripinfo_output: dir.join("Output/tripinfo.xml"),
        edgedata_output: dir.join("Output/edgeData.xml"),
        ..EngineLayout::default()
    };
    (scenario, engine)
}

/// Emit the scenario documents and fake a finished engine run.
pub fn prepare_finished_run(dir: &Path, params: &ScenarioParams) -> AnalysisInputs {
    let (scenario, engine) = layouts_in(dir);
    XmlConfigEmitter::new(scenario.clone())
        .emit(params)
        .expect("scenario documents");
    write_engine_outputs(&engine);
    AnalysisInputs::new(&engine, &scenario)
}

pub fn write_engine_outputs(engine: &EngineLayout) {
    for (path, contents) in [
        (&engine.summary_output, SUMMARY_XML),
        (&engine.tripinfo_output, TRIPINFO_XML),
        (&engine.edgedata_output, EDGE_DATA_XML),
    ] {
        write_file(path, contents);
    }
}

pub fn write_file(path: &Path, contents: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir");
    }
    fs::write(path, contents).expect("fixture write");
    path.to_path_buf()
}
