//! Column-aligned text output

use std::io::Write;

use anyhow::Result;

use crate::model::Table;

use super::OutputFormatter;

/// Spaces between adjacent columns
const COLUMN_GAP: usize = 2;

/// Column-aligned output with optional cell truncation
pub struct PrettyOutput {
    max_cell_length: Option<usize>,
}

impl PrettyOutput {
    /// `None` leaves cells at full length
    pub fn new(max_cell_length: Option<usize>) -> Self {
        Self { max_cell_length }
    }

    fn truncate<'a>(&self, cell: &'a str) -> &'a str {
        match self.max_cell_length {
            Some(max) => match cell.char_indices().nth(max) {
                Some((end, _)) => &cell[..end],
                None => cell,
            },
            None => cell,
        }
    }
}

impl Default for PrettyOutput {
    fn default() -> Self {
        Self::new(None)
    }
}

impl OutputFormatter for PrettyOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let lines: Vec<Vec<&str>> = std::iter::once(table.column_names().collect::<Vec<_>>())
            .chain(
                table
                    .rows()
                    .iter()
                    .map(|row| row.cells.iter().map(String::as_str).collect()),
            )
            .map(|line| line.into_iter().map(|cell| self.truncate(cell)).collect())
            .collect();

        let mut col_widths = vec![0; table.column_count()];
        for line in &lines {
            for (i, cell) in line.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }

        for line in &lines {
            let mut output = String::new();
            for (i, cell) in line.iter().enumerate() {
                if i > 0 {
                    output.push_str(&" ".repeat(COLUMN_GAP));
                }
                output.push_str(&format!("{:width$}", cell, width = col_widths[i]));
            }
            writeln!(writer, "{}", output.trim_end())?;
        }
        Ok(())
    }
}
