//! Ready-made sweep axes.
//!
//! Speeds are in m/s, flows in vehicles per hour. Ranges include their stop
//! value.

use sim_sweep_core::{AxesConfig, AxisSpec};

/// Full-resolution sweep run when no configuration is given.
pub fn default_axes() -> AxesConfig {
    AxesConfig {
        highway_speed: AxisSpec::range(25.0, 129.5, 0.5),
        ramp_speed: AxisSpec::range(15.0, 99.5, 0.5),
        mainline_flow: AxisSpec::range(800.0, 4950.0, 50.0),
        ramp_flow: AxisSpec::range(200.0, 1975.0, 25.0),
    }
}

/// Coarse grid for a first look at the response surface.
pub fn coarse_axes() -> AxesConfig {
    AxesConfig {
        highway_speed: AxisSpec::range(25.0, 125.0, 5.0),
        ramp_speed: AxisSpec::range(15.0, 95.0, 5.0),
        mainline_flow: AxisSpec::range(800.0, 4600.0, 400.0),
        ramp_flow: AxisSpec::range(200.0, 1800.0, 200.0),
    }
}

/// A handful of runs for smoke-testing an engine installation.
pub fn minimal_axes() -> AxesConfig {
    AxesConfig {
        highway_speed: AxisSpec::values(vec![30.0]),
        ramp_speed: AxisSpec::values(vec![15.0, 20.0]),
        mainline_flow: AxisSpec::values(vec![1800.0]),
        ramp_flow: AxisSpec::values(vec![400.0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterSpace;
    use sim_sweep_core::normalize_axes;

    fn space(axes: AxesConfig) -> ParameterSpace {
        ParameterSpace::from_axes(normalize_axes(&axes).expect("built-in axes are valid"))
    }

    #[test]
    fn default_axes_cover_the_full_grid() {
        let axes = normalize_axes(&default_axes()).unwrap();
        assert_eq!(axes.highway_speeds.len(), 210);
        assert_eq!(axes.highway_speeds.last(), Some(&129.5));
        assert_eq!(axes.ramp_speeds.len(), 170);
        assert_eq!(axes.mainline_flows.first(), Some(&800));
        assert_eq!(axes.mainline_flows.last(), Some(&4950));
        assert_eq!(axes.ramp_flows.len(), 72);
    }

    #[test]
    fn coarse_axes_count() {
        let space = space(coarse_axes());
        assert_eq!(space.highway_speeds().len(), 21);
        assert_eq!(space.ramp_speeds().len(), 17);
        assert_eq!(space.mainline_flows().len(), 10);
        assert_eq!(space.ramp_flows().len(), 9);
        assert_eq!(space.count_valid(), space.combinations().count() as u64);
    }

    #[test]
    fn minimal_axes_are_small() {
        assert_eq!(space(minimal_axes()).count_valid(), 2);
    }
}
