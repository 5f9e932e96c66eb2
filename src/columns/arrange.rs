//! Explicit column rearrangement

use rustc_hash::FxHashSet;

use crate::error::{CheckError, RearrangeFault, Result};
use crate::model::Table;

/// Reorder `table`'s columns to exactly `order`
///
/// `order` must be a permutation of the current header: every name known,
/// none repeated, none left out.
pub fn rearrange<S: AsRef<str>>(table: &Table, order: &[S]) -> Result<Table> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut positions = Vec::with_capacity(order.len());

    for name in order {
        let name = name.as_ref();
        let position = table
            .column_index(name)
            .ok_or_else(|| CheckError::rearrangement(name, RearrangeFault::Unknown))?;
        if !seen.insert(name) {
            return Err(CheckError::rearrangement(name, RearrangeFault::Duplicate));
        }
        positions.push(position);
    }

    if let Some(missing) = table.column_names().find(|name| !seen.contains(name)) {
        return Err(CheckError::rearrangement(missing, RearrangeFault::Missing));
    }

    Ok(table.select(&positions))
}
