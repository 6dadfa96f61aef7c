//! Parameter space for the ramp-merge sweep.
//!
//! A [`ParameterSpace`] holds four ordered axes and lazily yields every valid
//! [`ParameterCombination`] in a fixed order: highway speed, then ramp speed,
//! then mainline flow, then ramp flow. A speed pair is valid only when the
//! highway is strictly faster than the ramp; invalid pairs are skipped
//! without ever being materialized.

mod combinations;
mod constraints;
mod conversion;

use serde::{Deserialize, Serialize};
use sim_core::scenario::ScenarioParams;
use sim_sweep_core::NormalizedAxes;

pub use constraints::is_valid_speed_pair;

/// One point of the sweep. Always satisfies `highway_speed > ramp_speed`
/// when produced by [`ParameterSpace::combinations`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterCombination {
    pub highway_speed: f64,
    pub ramp_speed: f64,
    pub mainline_flow: u32,
    pub ramp_flow: u32,
}

impl ParameterCombination {
    pub fn scenario_params(&self) -> ScenarioParams {
        conversion::combination_to_scenario_params(self)
    }
}

/// The four sweep axes, kept in input order with duplicates preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSpace {
    highway_speeds: Vec<f64>,
    ramp_speeds: Vec<f64>,
    mainline_flows: Vec<u32>,
    ramp_flows: Vec<u32>,
}

impl ParameterSpace {
    /// Empty space; every axis must be set before it yields anything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_axes(axes: NormalizedAxes) -> Self {
        Self {
            highway_speeds: axes.highway_speeds,
            ramp_speeds: axes.ramp_speeds,
            mainline_flows: axes.mainline_flows,
            ramp_flows: axes.ramp_flows,
        }
    }

    pub fn highway_speed(mut self, speeds: Vec<f64>) -> Self {
        self.highway_speeds = speeds;
        self
    }

    pub fn ramp_speed(mut self, speeds: Vec<f64>) -> Self {
        self.ramp_speeds = speeds;
        self
    }

    pub fn mainline_flow(mut self, flows: Vec<u32>) -> Self {
        self.mainline_flows = flows;
        self
    }

    pub fn ramp_flow(mut self, flows: Vec<u32>) -> Self {
        self.ramp_flows = flows;
        self
    }

    pub fn highway_speeds(&self) -> &[f64] {
        &self.highway_speeds
    }

    pub fn ramp_speeds(&self) -> &[f64] {
        &self.ramp_speeds
    }

    pub fn mainline_flows(&self) -> &[u32] {
        &self.mainline_flows
    }

    pub fn ramp_flows(&self) -> &[u32] {
        &self.ramp_flows
    }

    /// Number of valid combinations, computed from the axes without
    /// enumerating the flow product. Saturates at `u64::MAX`.
    pub fn count_valid(&self) -> u64 {
        let flows_per_pair =
            (self.mainline_flows.len() as u64).saturating_mul(self.ramp_flows.len() as u64);
        if flows_per_pair == 0 {
            return 0;
        }

        self.highway_speeds
            .iter()
            .map(|&highway| {
                self.ramp_speeds
                    .iter()
                    .filter(|&&ramp| is_valid_speed_pair(highway, ramp))
                    .count() as u64
            })
            .fold(0u64, |total, pairs| {
                total.saturating_add(pairs.saturating_mul(flows_per_pair))
            })
    }

    /// Lazily enumerate the valid combinations. Each call starts a fresh pass
    /// over the same sequence.
    pub fn combinations(&self) -> impl Iterator<Item = ParameterCombination> + '_ {
        combinations::generate_combinations(self)
    }
}
