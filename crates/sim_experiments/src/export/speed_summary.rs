use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use super::ExportError;

/// Sweep-wide table with one configuration + mean speed row per collected
/// run. Columns seen for the first time are merged into the header and
/// earlier rows get empty cells for them.
pub struct SpeedSummary {
    path: PathBuf,
    header: Vec<String>,
}

impl SpeedSummary {
    /// Start an empty table at `path`, discarding one left by an earlier sweep.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let path = path.into();
        match fs::remove_file(&path) {
            Err(source) if source.kind() != io::ErrorKind::NotFound => {
                return Err(ExportError::Io { path, source })
            }
            _ => {}
        }
        Ok(Self {
            path,
            header: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Append every row of a per-run CSV table; returns how many were added.
    pub fn append_table(&mut self, table: &Path) -> Result<usize, ExportError> {
        let csv_error = |source| ExportError::Csv {
            path: table.to_path_buf(),
            source,
        };
        let mut reader = csv::Reader::from_path(table).map_err(csv_error)?;
        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut added = 0;
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let values: Vec<String> = record.iter().map(str::to_string).collect();
            self.append_row(&columns, &values)?;
            added += 1;
        }
        Ok(added)
    }

    /// Append one row given as parallel `columns` / `values`.
    pub fn append_row(&mut self, columns: &[String], values: &[String]) -> Result<(), ExportError> {
        let new_columns: Vec<String> = columns
            .iter()
            .filter(|column| !self.header.contains(column))
            .cloned()
            .collect();

        if self.header.is_empty() {
            self.header = new_columns;
            let row = self.arrange(columns, values);
            return self.rewrite(Vec::new(), row);
        }
        if !new_columns.is_empty() {
            let existing = self.read_rows()?;
            let width = self.header.len() + new_columns.len();
            let existing = existing
                .into_iter()
                .map(|mut row| {
                    row.resize(width, String::new());
                    row
                })
                .collect();
            self.header.extend(new_columns);
            let row = self.arrange(columns, values);
            return self.rewrite(existing, row);
        }

        let row = self.arrange(columns, values);
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record(&row).map_err(|source| self.csv_error(source))?;
        wtr.flush().map_err(|source| self.io_error(source))
    }

    /// `values` reordered to the table header; absent columns stay empty.
    fn arrange(&self, columns: &[String], values: &[String]) -> Vec<String> {
        self.header
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .position(|column| column == name)
                    .and_then(|index| values.get(index).cloned())
                    .unwrap_or_default()
            })
            .collect()
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, ExportError> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|source| self.csv_error(source))?;
        reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_string).collect())
                    .map_err(|source| self.csv_error(source))
            })
            .collect()
    }

    fn rewrite(&self, rows: Vec<Vec<String>>, last: Vec<String>) -> Result<(), ExportError> {
        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(&self.header)
            .map_err(|source| self.csv_error(source))?;
        for row in rows.iter().chain(std::iter::once(&last)) {
            wtr.write_record(row).map_err(|source| self.csv_error(source))?;
        }
        wtr.flush().map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> ExportError {
        ExportError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> ExportError {
        ExportError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn rows_accumulate_under_one_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim_summary_min.csv");
        let mut table = SpeedSummary::create(&path).unwrap();
        let columns = strings(&["sim_id", "meanSpeed_avg"]);

        table
            .append_row(&columns, &strings(&["iteration_1", "26.0"]))
            .unwrap();
        table
            .append_row(&columns, &strings(&["iteration_2", "24.5"]))
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "sim_id,meanSpeed_avg\niteration_1,26.0\niteration_2,24.5\n"
        );
    }

    #[test]
    fn new_columns_are_merged_into_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim_summary_min.csv");
        let mut table = SpeedSummary::create(&path).unwrap();

        table
            .append_row(
                &strings(&["sim_id", "meanSpeed_avg"]),
                &strings(&["iteration_1", "26.0"]),
            )
            .unwrap();
        table
            .append_row(
                &strings(&["meanSpeed_avg", "sim_id", "ramp_speed"]),
                &strings(&["24.5", "iteration_2", "12.5"]),
            )
            .unwrap();

        assert_eq!(table.header(), strings(&["sim_id", "meanSpeed_avg", "ramp_speed"]));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "sim_id,meanSpeed_avg,ramp_speed\niteration_1,26.0,\niteration_2,24.5,12.5\n"
        );
    }

    #[test]
    fn per_run_tables_are_appended_and_old_sweeps_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim_summary_min.csv");
        fs::write(&path, "stale\nrow\n").unwrap();
        let run = dir.path().join("mean_speed_with_config.csv");
        fs::write(&run, "sim_id,highway_speed\niteration_4,30.0\n").unwrap();

        let mut table = SpeedSummary::create(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(table.append_table(&run).unwrap(), 1);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "sim_id,highway_speed\niteration_4,30.0\n"
        );
    }
}
