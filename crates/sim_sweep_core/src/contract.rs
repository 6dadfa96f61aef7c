use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::axis::{to_integral, AxisSpec, ParseError};

pub const AXIS_HIGHWAY_SPEED: &str = "highway_speed";
pub const AXIS_RAMP_SPEED: &str = "ramp_speed";
pub const AXIS_MAINLINE_FLOW: &str = "mainline_flow";
pub const AXIS_RAMP_FLOW: &str = "ramp_flow";

/// The four sweep axes as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxesConfig {
    pub highway_speed: AxisSpec,
    pub ramp_speed: AxisSpec,
    pub mainline_flow: AxisSpec,
    pub ramp_flow: AxisSpec,
}

/// Expanded axes, ready to be combined.
///
/// Speeds stay fractional; flow rates are whole vehicles per hour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedAxes {
    pub highway_speeds: Vec<f64>,
    pub ramp_speeds: Vec<f64>,
    pub mainline_flows: Vec<u32>,
    pub ramp_flows: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn normalize_axes(config: &AxesConfig) -> Result<NormalizedAxes, ParseError> {
    let highway_speeds = expand_named(AXIS_HIGHWAY_SPEED, &config.highway_speed)?;
    let ramp_speeds = expand_named(AXIS_RAMP_SPEED, &config.ramp_speed)?;
    let mainline_flows = expand_integral(AXIS_MAINLINE_FLOW, &config.mainline_flow)?;
    let ramp_flows = expand_integral(AXIS_RAMP_FLOW, &config.ramp_flow)?;

    Ok(NormalizedAxes {
        highway_speeds,
        ramp_speeds,
        mainline_flows,
        ramp_flows,
    })
}

fn expand_named(axis: &str, spec: &AxisSpec) -> Result<Vec<f64>, ParseError> {
    spec.expand().map_err(|error| error.for_axis(axis))
}

fn expand_integral(axis: &str, spec: &AxisSpec) -> Result<Vec<u32>, ParseError> {
    let values = expand_named(axis, spec)?;
    to_integral(&values).map_err(|error| error.for_axis(axis))
}

/// SHA-256 over the stable JSON form of the expanded axes.
///
/// Two sweeps with the same fingerprint enumerate the same combinations in
/// the same order, so iteration indices are comparable between them.
pub fn axes_fingerprint(axes: &NormalizedAxes) -> String {
    let mut hasher = Sha256::new();
    hasher.update(stable_contract_json(axes));
    format!("{:x}", hasher.finalize())
}

pub fn stable_contract_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).unwrap_or_default()
}
