//! Output formatting for result tables

mod csv;
mod json;
mod pretty;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::pretty::PrettyOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a result table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;

    /// Render a result table to a string
    fn render_to_string(&self, table: &Table) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(table, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, max_cell_length: Option<usize>) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Pretty => Box::new(PrettyOutput::new(max_cell_length)),
            OutputFormat::Csv => Box::new(CsvOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Write one labelled result section
pub fn render_result(
    formatter: &dyn OutputFormatter,
    file_name: &str,
    table: &Table,
    writer: &mut dyn Write,
) -> Result<()> {
    writeln!(writer, "Results for file {}:", file_name)?;
    formatter.render(table, writer)?;
    writeln!(writer)?;
    Ok(())
}

/// File name for a written result: `csvcheck_<stem>[_<timestamp>].csv`
pub fn result_file_name(input: &Path, timestamp: Option<&str>) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    match timestamp {
        Some(ts) => format!("csvcheck_{}_{}.csv", stem, ts),
        None => format!("csvcheck_{}.csv", stem),
    }
}
