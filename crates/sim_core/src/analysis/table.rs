use std::fs;
use std::path::Path;

use super::AnalysisError;

/// An ordered header plus rows of pre-rendered cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.header.len());
        self.rows.push(row);
    }

    /// Value of `column` in row `row`, for assertions and lookups.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.header.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}

/// Write `table` as CSV. A table without columns produces an empty file.
pub fn write_table(path: &Path, table: &Table) -> Result<(), AnalysisError> {
    let csv_error = |source| AnalysisError::Csv {
        path: path.to_path_buf(),
        source,
    };

    if table.header.is_empty() {
        return fs::write(path, "").map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
    wtr.write_record(&table.header).map_err(csv_error)?;
    for row in &table.rows {
        wtr.write_record(row).map_err(csv_error)?;
    }
    wtr.flush()
        .map_err(|source| csv_error(csv::Error::from(source)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let mut table = Table::new(["id", "depart"]);
        table.push_row(vec!["main.0".to_string(), "0.0".to_string()]);
        table.push_row(vec!["ramp, 1".to_string(), "2.5".to_string()]);

        write_table(&path, &table).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,depart\nmain.0,0.0\n\"ramp, 1\",2.5\n"
        );
    }

    #[test]
    fn columnless_table_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_table(&path, &Table::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn cell_looks_up_by_column_name() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec!["1".to_string(), "2".to_string()]);
        assert_eq!(table.cell(0, "b"), Some("2"));
        assert_eq!(table.cell(0, "c"), None);
        assert_eq!(table.cell(1, "a"), None);
    }
}
