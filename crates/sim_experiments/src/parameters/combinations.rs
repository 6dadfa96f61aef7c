use super::constraints::{is_valid_combination, is_valid_speed_pair};
use super::{ParameterCombination, ParameterSpace};

/// Cartesian product of the axes with invalid speed pairs pruned before the
/// flow axes are expanded.
pub(super) fn generate_combinations(
    space: &ParameterSpace,
) -> impl Iterator<Item = ParameterCombination> + '_ {
    space
        .highway_speeds
        .iter()
        .flat_map(move |&highway_speed| expand_with_ramp_speeds(space, highway_speed))
}

fn expand_with_ramp_speeds(
    space: &ParameterSpace,
    highway_speed: f64,
) -> impl Iterator<Item = ParameterCombination> + '_ {
    space
        .ramp_speeds
        .iter()
        .filter(move |&&ramp_speed| is_valid_speed_pair(highway_speed, ramp_speed))
        .flat_map(move |&ramp_speed| expand_with_mainline_flows(space, highway_speed, ramp_speed))
}

fn expand_with_mainline_flows(
    space: &ParameterSpace,
    highway_speed: f64,
    ramp_speed: f64,
) -> impl Iterator<Item = ParameterCombination> + '_ {
    space.mainline_flows.iter().flat_map(move |&mainline_flow| {
        expand_with_ramp_flows(space, highway_speed, ramp_speed, mainline_flow)
    })
}

fn expand_with_ramp_flows(
    space: &ParameterSpace,
    highway_speed: f64,
    ramp_speed: f64,
    mainline_flow: u32,
) -> impl Iterator<Item = ParameterCombination> + '_ {
    space
        .ramp_flows
        .iter()
        .map(move |&ramp_flow| ParameterCombination {
            highway_speed,
            ramp_speed,
            mainline_flow,
            ramp_flow,
        })
        .inspect(|combo| debug_assert!(is_valid_combination(combo)))
}
