//! Row key extraction for comparisons

use rayon::prelude::*;

use super::table::{Row, Table};

/// Scoped cell values of one row, compared by exact text
pub type RowKey<'a> = Vec<&'a str>;

/// Tables at or below this row count are keyed on the calling thread
const PARALLEL_THRESHOLD: usize = 4096;

/// Builder for computing composite keys
pub struct KeyBuilder {
    column_indices: Vec<usize>,
}

impl KeyBuilder {
    /// Create a key builder over the given column positions
    pub fn new(column_indices: Vec<usize>) -> Self {
        Self { column_indices }
    }

    /// Build the key of a single row
    pub fn build_key<'a>(&self, row: &'a Row) -> RowKey<'a> {
        self.column_indices
            .iter()
            .filter_map(|&i| row.get(i))
            .collect()
    }

    /// Build the keys of every data row, in row order
    pub fn build_keys<'a>(&self, table: &'a Table) -> Vec<RowKey<'a>> {
        if table.row_count() <= PARALLEL_THRESHOLD {
            table.rows().iter().map(|row| self.build_key(row)).collect()
        } else {
            table.rows().par_iter().map(|row| self.build_key(row)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_follow_scope_order() {
        let table = Table::from_records([["a", "b", "c"], ["1", "2", "3"], ["4", "5", "6"]]).unwrap();
        let keys = KeyBuilder::new(vec![2, 0]).build_keys(&table);
        assert_eq!(keys, vec![vec!["3", "1"], vec!["6", "4"]]);
    }

    #[test]
    fn test_keys_do_not_collide_on_separators() {
        let table = Table::from_records([["a", "b"], ["x|y", "z"], ["x", "y|z"]]).unwrap();
        let keys = KeyBuilder::new(vec![0, 1]).build_keys(&table);
        assert_ne!(keys[0], keys[1]);
    }

    #[test]
    fn test_parallel_keys_keep_row_order() {
        let mut records = vec![vec!["n".to_string()]];
        records.extend((0..PARALLEL_THRESHOLD + 10).map(|i| vec![i.to_string()]));
        let table = Table::from_records(records).unwrap();
        let keys = KeyBuilder::new(vec![0]).build_keys(&table);
        assert_eq!(keys.len(), PARALLEL_THRESHOLD + 10);
        assert_eq!(keys[PARALLEL_THRESHOLD + 9], vec![(PARALLEL_THRESHOLD + 9).to_string()]);
    }
}
