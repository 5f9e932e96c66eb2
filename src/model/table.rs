//! Table and Row data structures

use indexmap::IndexSet;

use crate::error::{CheckError, Result};

/// A data row; cells are raw text and compared by exact equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Get a cell by column position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Build a new row from the cells at the given positions
    fn select(&self, positions: &[usize]) -> Row {
        Row::new(positions.iter().map(|&i| self.cells[i].clone()).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A header plus data rows, every row as wide as the header
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names; the set position of a name is its column position
    columns: IndexSet<String>,
    rows: Vec<Row>,
}

// IndexSet equality ignores order; column order is significant here
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.columns.iter().eq(other.columns.iter()) && self.rows == other.rows
    }
}

impl Eq for Table {}

impl Table {
    /// Create an empty table, rejecting duplicate column names
    pub fn new<I, S>(header: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = IndexSet::new();
        for name in header {
            let name = name.into();
            if columns.contains(&name) {
                return Err(CheckError::invalid_table(format!(
                    "duplicate column name '{}' in header",
                    name
                )));
            }
            columns.insert(name);
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Build a table from raw records where record 0 is the header
    pub fn from_records<I, R, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut records = records.into_iter();
        let header = records
            .next()
            .ok_or_else(|| CheckError::invalid_table("missing header row"))?;

        let mut table = Table::new(header)?;
        for record in records {
            table.push_row(record.into_iter().collect())?;
        }
        Ok(table)
    }

    /// Append a data row, rejecting rows that disagree with the header width
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if row.cells.len() != self.column_count() {
            return Err(CheckError::invalid_table(format!(
                "data row {} has {} cells but the header has {} columns",
                self.rows.len() + 1,
                row.cells.len(),
                self.column_count()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Get column position by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Check whether the header contains a column
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Column names in header order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(String::as_str)
    }

    /// Column name at a position
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get_index(index).map(String::as_str)
    }

    /// Data rows (header excluded)
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// New table with an extra trailing column filled from `values`
    pub fn with_appended_column(&self, name: &str, values: Vec<String>) -> Result<Table> {
        if values.len() != self.row_count() {
            return Err(CheckError::invalid_table(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.row_count()
            )));
        }

        let mut table = Table::new(self.column_names().chain(std::iter::once(name)))?;
        table.rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut cells = row.cells.clone();
                cells.push(value);
                Row::new(cells)
            })
            .collect();
        Ok(table)
    }

    /// New table containing the columns at `positions`, in that order
    ///
    /// Positions must be distinct and in range; callers resolve them from
    /// this table's header first.
    pub fn select(&self, positions: &[usize]) -> Table {
        let columns = positions
            .iter()
            .map(|&i| self.columns[i].clone())
            .collect();
        let rows = self.rows.iter().map(|row| row.select(positions)).collect();
        Table { columns, rows }
    }

    /// New table with the same header and only the rows at `positions`
    pub fn take_rows(&self, positions: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: positions.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Header followed by data rows, as plain records
    pub fn to_records(&self) -> Vec<Vec<String>> {
        std::iter::once(self.columns.iter().cloned().collect())
            .chain(self.rows.iter().map(|row| row.cells.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records() {
        let table = Table::from_records([["a", "b"], ["1", "2"], ["3", "4"]]).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.rows()[1].get(0), Some("3"));
    }

    #[test]
    fn test_rejects_duplicate_header() {
        let err = Table::from_records([["a", "a"]]).unwrap_err();
        assert!(matches!(err, CheckError::InvalidTable { .. }));
    }

    #[test]
    fn test_rejects_ragged_row() {
        let records = vec![vec!["a", "b"], vec!["1"]];
        let err = Table::from_records(records).unwrap_err();
        assert!(err.to_string().contains("data row 1"));
    }

    #[test]
    fn test_rejects_missing_header() {
        let records: Vec<Vec<String>> = Vec::new();
        assert!(Table::from_records(records).is_err());
    }

    #[test]
    fn test_select_reorders_columns() {
        let table = Table::from_records([["a", "b", "c"], ["1", "2", "3"]]).unwrap();
        let selected = table.select(&[2, 0]);
        assert_eq!(
            selected.to_records(),
            vec![vec!["c", "a"], vec!["3", "1"]]
        );
        // source untouched
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_equality_respects_column_order() {
        let ab = Table::from_records([["a", "b"]]).unwrap();
        let ba = Table::from_records([["b", "a"]]).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_with_appended_column() {
        let table = Table::from_records([["a"], ["x"], ["y"]]).unwrap();
        let extended = table
            .with_appended_column("n", vec!["1".into(), "2".into()])
            .unwrap();
        assert_eq!(
            extended.to_records(),
            vec![vec!["a", "n"], vec!["x", "1"], vec!["y", "2"]]
        );
        assert!(table.with_appended_column("a", vec!["1".into(), "2".into()]).is_err());
    }
}
