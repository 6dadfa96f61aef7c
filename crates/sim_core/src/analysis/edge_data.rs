use std::path::Path;

use crate::format::{decimal, optional_decimal};

use super::table::Table;
use super::xml::{children_named, XmlFile};
use super::AnalysisError;

pub(super) const EDGE_DENSITY_COLUMNS: [&str; 7] =
    ["begin", "end", "edge", "speed", "density", "entered", "left"];

/// One row per `interval/edge`. The engine leaves `speed` and `density` off
/// edges that saw no traffic in an interval; those cells stay empty.
pub(super) fn edge_density_table(path: &Path) -> Result<Table, AnalysisError> {
    let file = XmlFile::read(path)?;
    let doc = file.parse()?;
    let mut table = Table::new(EDGE_DENSITY_COLUMNS);

    for interval in children_named(&doc, "interval") {
        let begin: f64 = file.number(interval, "begin")?;
        let end: f64 = file.number(interval, "end")?;
        for edge in interval.children().filter(|node| node.has_tag_name("edge")) {
            let id = file.attr(edge, "id")?;
            let speed: Option<f64> = file.optional_number(edge, "speed")?;
            let density: Option<f64> = file.optional_number(edge, "density")?;
            let entered: i64 = file.number(edge, "entered")?;
            let left: i64 = file.number(edge, "left")?;
            table.push_row(vec![
                decimal(begin),
                decimal(end),
                id.to_string(),
                optional_decimal(speed),
                optional_decimal(density),
                entered.to_string(),
                left.to_string(),
            ]);
        }
    }

    Ok(table)
}
