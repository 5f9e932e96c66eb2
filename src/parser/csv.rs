//! CSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::config::Config;
use crate::model::Table;

use super::Parser;

/// Parser for delimiter-separated text files
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Comma-separated files
    pub fn comma() -> Self {
        Self::new(b',')
    }

    /// Tab-separated files
    pub fn tab() -> Self {
        Self::new(b'\t')
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path, _config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let table = read_table(BufReader::new(file), self.delimiter)
            .with_context(|| format!("Failed to read table from {}", path.display()))?;
        debug!(
            "read {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.delimiter {
            b'\t' => ext == "tsv",
            _ => matches!(ext, "csv" | "txt"),
        }
    }
}

/// Read a table from delimited text; the first record is the header
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV record {}", line_num + 1))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Table::from_records(records)?)
}
