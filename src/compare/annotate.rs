//! Original row position annotation

use crate::error::{CheckError, Result};
use crate::model::Table;

/// Name of the column holding original row positions
pub const INDEX_COLUMN: &str = "_ind";

/// Append an `_ind` column holding each row's original 1-based position
pub fn annotate(table: &Table, indices: &[usize]) -> Result<Table> {
    if table.has_column(INDEX_COLUMN) {
        return Err(CheckError::invalid_table(format!(
            "table already has a column named {}",
            INDEX_COLUMN
        )));
    }
    let values = indices.iter().map(usize::to_string).collect();
    table.with_appended_column(INDEX_COLUMN, values)
}
