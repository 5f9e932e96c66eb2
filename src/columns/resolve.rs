//! Column name resolution

use rustc_hash::FxHashSet;

use crate::error::{CheckError, Result};
use crate::model::Table;

/// Resolve column names to positions in `table`'s header
///
/// Fails on the first name the header does not contain.
pub fn resolve<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            table
                .column_index(name)
                .ok_or_else(|| CheckError::resolution(name))
        })
        .collect()
}

/// Column names present in both headers, in `first`'s header order
pub fn common_columns(first: &Table, second: &Table) -> Vec<String> {
    let other: FxHashSet<&str> = second.column_names().collect();
    first
        .column_names()
        .filter(|name| other.contains(name))
        .map(str::to_string)
        .collect()
}
