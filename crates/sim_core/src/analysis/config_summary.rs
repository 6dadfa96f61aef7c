use std::path::Path;

use crate::format::{decimal, optional_decimal};

use super::summary::mean_speeds;
use super::table::Table;
use super::xml::XmlFile;
use super::AnalysisError;

pub(super) const MEAN_SPEED_COLUMNS: [&str; 7] = [
    "sim_id",
    "highway_speed",
    "ramp_speed",
    "vehsPerHour_main",
    "vehsPerHour_ramp",
    "vehsPerHour_total",
    "meanSpeed_avg",
];

const HIGHWAY_MIN_PRIORITY: i64 = 3;
const RAMP_MAX_PRIORITY: i64 = 1;

#[derive(Debug, Default, PartialEq)]
struct FlowTotals {
    main: f64,
    ramp: f64,
    total: f64,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Average speed limit of highway and ramp edges, recovered from the edge
/// document actually used for the run.
fn configured_speeds(file: &XmlFile) -> Result<(Option<f64>, Option<f64>), AnalysisError> {
    let doc = file.parse()?;
    let mut highway = Vec::new();
    let mut ramp = Vec::new();

    for edge in doc.descendants().filter(|node| node.has_tag_name("edge")) {
        let Some(speed) = edge
            .attribute("speed")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
        else {
            continue;
        };
        let id = edge.attribute("id").unwrap_or_default();
        let priority: Option<i64> = file.optional_number(edge, "priority")?;

        if id.contains("main") || priority.is_some_and(|p| p >= HIGHWAY_MIN_PRIORITY) {
            highway.push(speed);
        } else if id.contains("ramp") || priority.is_some_and(|p| p <= RAMP_MAX_PRIORITY) {
            ramp.push(speed);
        }
    }

    Ok((mean(&highway), mean(&ramp)))
}

/// Flow rates summed by flow id. A flow counts toward both `main` and `ramp`
/// if its id mentions both; every flow counts toward the total.
fn configured_flows(file: &XmlFile) -> Result<FlowTotals, AnalysisError> {
    let doc = file.parse()?;
    let mut totals = FlowTotals::default();

    for flow in doc.descendants().filter(|node| node.has_tag_name("flow")) {
        let id = flow.attribute("id").unwrap_or_default().to_lowercase();
        let rate = flow
            .attribute("vehsPerHour")
            .or_else(|| flow.attribute("vehsperhour"))
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        if id.contains("main") {
            totals.main += rate;
        }
        if id.contains("ramp") {
            totals.ramp += rate;
        }
        totals.total += rate;
    }

    Ok(totals)
}

/// Single row joining the run's configuration with its average network speed.
pub(super) fn mean_speed_table(
    sim_id: &str,
    edges_file: &Path,
    routes_file: &Path,
    summary_file: &Path,
) -> Result<Table, AnalysisError> {
    let (highway_speed, ramp_speed) = configured_speeds(&XmlFile::read(edges_file)?)?;
    let flows = configured_flows(&XmlFile::read(routes_file)?)?;
    let mean_speed = mean(&mean_speeds(&XmlFile::read(summary_file)?)?);

    let mut table = Table::new(MEAN_SPEED_COLUMNS);
    table.push_row(vec![
        sim_id.to_string(),
        optional_decimal(highway_speed),
        optional_decimal(ramp_speed),
        decimal(flows.main),
        decimal(flows.ramp),
        decimal(flows.total),
        optional_decimal(mean_speed),
    ]);
    Ok(table)
}
