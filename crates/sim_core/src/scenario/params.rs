use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default edge (topology) document written before every run.
pub const DEFAULT_EDGES_FILE: &str = "ramp/ramp.edg.xml";
/// Default route (flow) document written before every run.
pub const DEFAULT_ROUTES_FILE: &str = "ramp/ramp.rou.xml";

/// Flows depart during the first ten simulated minutes.
const DEFAULT_FLOW_BEGIN_S: u32 = 0;
const DEFAULT_FLOW_END_S: u32 = 600;

/// Values that vary between runs of the on-ramp merge scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Speed limit on every mainline edge (m/s).
    pub highway_speed: f64,
    /// Speed limit on the on-ramp edge (m/s).
    pub ramp_speed: f64,
    /// Vehicles per hour entering the mainline.
    pub mainline_vehs_per_hour: u32,
    /// Vehicles per hour entering from the ramp.
    pub ramp_vehs_per_hour: u32,
}

/// Where the scenario documents go and the fixed parts of their content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub edges_file: PathBuf,
    pub routes_file: PathBuf,
    pub flow_begin_s: u32,
    pub flow_end_s: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            edges_file: PathBuf::from(DEFAULT_EDGES_FILE),
            routes_file: PathBuf::from(DEFAULT_ROUTES_FILE),
            flow_begin_s: DEFAULT_FLOW_BEGIN_S,
            flow_end_s: DEFAULT_FLOW_END_S,
        }
    }
}

/// Which speed limit an edge takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadClass {
    Highway,
    Ramp,
}

#[derive(Debug, Clone, Copy)]
pub struct EdgeSpec {
    pub comment: &'static str,
    pub id: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub priority: u8,
    pub num_lanes: u8,
    pub class: RoadClass,
}

/// Two-lane highway that widens to three lanes right after the merge point
/// `N1`, where a single-lane ramp joins.
pub const RAMP_EDGES: [EdgeSpec; 4] = [
    EdgeSpec {
        comment: "Highway, 2 lanes, higher priority",
        id: "main_0",
        from: "N0",
        to: "N1",
        priority: 3,
        num_lanes: 2,
        class: RoadClass::Highway,
    },
    EdgeSpec {
        comment: "Highway segment WITH acceleration lane (3 lanes right after the merge)",
        id: "main_1a",
        from: "N1",
        to: "N1A",
        priority: 3,
        num_lanes: 3,
        class: RoadClass::Highway,
    },
    EdgeSpec {
        comment: "Highway segment AFTER acceleration lane ends (back to 2 lanes)",
        id: "main_1b",
        from: "N1A",
        to: "N2",
        priority: 3,
        num_lanes: 2,
        class: RoadClass::Highway,
    },
    EdgeSpec {
        comment: "Driveway / on-ramp, 1 lane, lower priority",
        id: "ramp_0",
        from: "R0",
        to: "N1",
        priority: 1,
        num_lanes: 1,
        class: RoadClass::Ramp,
    },
];

pub const VEHICLE_TYPE_ID: &str = "car";

/// Vehicle type attributes, in document order. Lane-change model is LC2013.
pub const CAR_TYPE_ATTRIBUTES: [(&str, &str); 9] = [
    ("accel", "2.6"),
    ("decel", "4.5"),
    ("length", "5.0"),
    ("maxSpeed", "38.0"),
    ("sigma", "0.5"),
    ("lcStrategic", "1.0"),
    ("lcCooperative", "1.0"),
    ("lcSpeedGain", "1.0"),
    ("lcKeepRight", "1.5"),
];

#[derive(Debug, Clone, Copy)]
pub struct FlowSpec {
    pub comment: &'static str,
    pub id: &'static str,
    pub route_edges: &'static str,
    pub class: RoadClass,
}

pub const RAMP_FLOWS: [FlowSpec; 2] = [
    FlowSpec {
        comment: "Mainline flow: steady highway traffic",
        id: "mainFlow",
        route_edges: "main_0 main_1a main_1b",
        class: RoadClass::Highway,
    },
    FlowSpec {
        comment: "Ramp flow: driveway vehicles merging in and using accel lane",
        id: "rampFlow",
        route_edges: "ramp_0 main_1a main_1b",
        class: RoadClass::Ramp,
    },
];

impl ScenarioParams {
    pub fn speed_for(&self, class: RoadClass) -> f64 {
        match class {
            RoadClass::Highway => self.highway_speed,
            RoadClass::Ramp => self.ramp_speed,
        }
    }

    pub fn vehs_per_hour_for(&self, class: RoadClass) -> u32 {
        match class {
            RoadClass::Highway => self.mainline_vehs_per_hour,
            RoadClass::Ramp => self.ramp_vehs_per_hour,
        }
    }
}
