use super::ParameterCombination;

/// A merge is only studied when mainline traffic is strictly faster than
/// the ramp.
pub fn is_valid_speed_pair(highway_speed: f64, ramp_speed: f64) -> bool {
    highway_speed > ramp_speed
}

/// Returns false for combinations that must never reach the engine.
pub(super) fn is_valid_combination(combo: &ParameterCombination) -> bool {
    is_valid_speed_pair(combo.highway_speed, combo.ramp_speed)
}
