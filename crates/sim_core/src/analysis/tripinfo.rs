use std::path::Path;

use crate::format::decimal;

use super::table::Table;
use super::xml::{children_named, XmlFile};
use super::AnalysisError;

const TIMED_COLUMNS: [&str; 5] = ["depart", "arrival", "duration", "routeLength", "waitingTime"];

pub(super) fn tripinfo_table(path: &Path) -> Result<Table, AnalysisError> {
    let file = XmlFile::read(path)?;
    let doc = file.parse()?;
    let mut table = Table::new(std::iter::once("id").chain(TIMED_COLUMNS));

    for trip in children_named(&doc, "tripinfo") {
        let mut row = Vec::with_capacity(TIMED_COLUMNS.len() + 1);
        row.push(file.attr(trip, "id")?.to_string());
        for column in TIMED_COLUMNS {
            let value: f64 = file.number(trip, column)?;
            row.push(decimal(value));
        }
        table.push_row(row);
    }

    Ok(table)
}
