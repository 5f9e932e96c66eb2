//! Strict CSV output

use std::io::Write;

use anyhow::Result;

use crate::model::Table;

use super::OutputFormatter;

/// CSV output formatter
pub struct CsvOutput {
    delimiter: u8,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);
        csv_writer.write_record(table.column_names())?;
        for row in table.rows() {
            csv_writer.write_record(&row.cells)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_quotes_when_needed() {
        let table = Table::from_records([["a", "b"], ["1", "x,y"], ["say \"hi\"", ""]]).unwrap();
        let text = CsvOutput::new().render_to_string(&table).unwrap();
        assert_eq!(text, "a,b\n1,\"x,y\"\n\"say \"\"hi\"\"\",\n");
    }

    #[test]
    fn test_tab_delimited_output() {
        let table = Table::from_records([["a", "b"], ["1", "2"]]).unwrap();
        let text = CsvOutput::with_delimiter(b'\t').render_to_string(&table).unwrap();
        assert_eq!(text, "a\tb\n1\t2\n");
    }
}
