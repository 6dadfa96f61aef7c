use std::path::Path;

use crate::format::decimal;

use super::table::Table;
use super::xml::{children_named, XmlFile};
use super::AnalysisError;

/// One row per `step`; columns are the attribute names in first-seen order.
pub(super) fn summary_steps_table(path: &Path) -> Result<Table, AnalysisError> {
    let file = XmlFile::read(path)?;
    let doc = file.parse()?;

    let mut header: Vec<String> = Vec::new();
    let mut steps: Vec<Vec<(usize, f64)>> = Vec::new();
    for step in children_named(&doc, "step") {
        let mut values = Vec::new();
        for attribute in step.attributes() {
            let column = match header.iter().position(|name| name == attribute.name()) {
                Some(column) => column,
                None => {
                    header.push(attribute.name().to_string());
                    header.len() - 1
                }
            };
            values.push((column, file.number(step, attribute.name())?));
        }
        steps.push(values);
    }

    let mut table = Table::new(header);
    for values in steps {
        let mut row = vec![String::new(); table.header.len()];
        for (column, value) in values {
            row[column] = decimal(value);
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Every `step/@meanSpeed` that parses, in document order.
pub(super) fn mean_speeds(file: &XmlFile) -> Result<Vec<f64>, AnalysisError> {
    let doc = file.parse()?;
    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("step"))
        .filter_map(|step| step.attribute("meanSpeed"))
        .filter_map(|raw| raw.trim().parse::<f64>().ok())
        .collect())
}
