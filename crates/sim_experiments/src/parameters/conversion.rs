use super::ParameterCombination;
use sim_core::scenario::ScenarioParams;

pub(super) fn combination_to_scenario_params(combo: &ParameterCombination) -> ScenarioParams {
    ScenarioParams {
        highway_speed: combo.highway_speed,
        ramp_speed: combo.ramp_speed,
        mainline_vehs_per_hour: combo.mainline_flow,
        ramp_vehs_per_hour: combo.ramp_flow,
    }
}
