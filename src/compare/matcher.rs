//! Row matching algorithm

use std::collections::VecDeque;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::columns::resolve;
use crate::config::{Function, Method};
use crate::error::{CheckError, Result};
use crate::model::{KeyBuilder, RowKey, Table};

use super::{ColumnScope, Comparison, RowComparator};

/// Row comparator using hash-based lookup of scoped row keys
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyMatcher;

impl KeyMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl RowComparator for KeyMatcher {
    fn compare(
        &self,
        first: &Table,
        second: &Table,
        scope: &ColumnScope,
        method: Method,
        function: Function,
    ) -> Result<Comparison> {
        let (positions1, positions2) = scope_positions(first, second, scope)?;
        let keys1 = KeyBuilder::new(positions1).build_keys(first);
        let keys2 = KeyBuilder::new(positions2).build_keys(second);

        let (found1, found2) = match method {
            Method::Match => pair_rows(&keys1, &keys2),
            Method::Set => member_rows(&keys1, &keys2),
            Method::Direct => direct_rows(&keys1, &keys2)?,
        };
        debug!(
            "{} method paired {} of {} and {} of {} rows",
            method,
            found1.iter().filter(|&&f| f).count(),
            found1.len(),
            found2.iter().filter(|&&f| f).count(),
            found2.len()
        );

        let want = function == Function::Common;
        let (first, first_indices) = emit(first, &found1, want);
        let (second, second_indices) = emit(second, &found2, want);

        Ok(Comparison {
            first,
            first_indices,
            second,
            second_indices,
        })
    }
}

/// Resolve the scope to column positions in each table
fn scope_positions(
    first: &Table,
    second: &Table,
    scope: &ColumnScope,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let names: Vec<&str> = match scope {
        ColumnScope::Use(names) => names.iter().map(String::as_str).collect(),
        ColumnScope::All => shared_names(first, second, &[])?,
        ColumnScope::Ignore(ignored) => {
            if let Some(unknown) = ignored
                .iter()
                .find(|name| !first.has_column(name) && !second.has_column(name))
            {
                return Err(CheckError::comparison(format!(
                    "ignored column {} is in neither table",
                    unknown
                )));
            }
            shared_names(first, second, ignored)?
        }
    };

    if names.is_empty() {
        return Err(CheckError::comparison("no columns to compare"));
    }

    let positions1 = resolve(first, &names).map_err(|e| scope_error(e, "first"))?;
    let positions2 = resolve(second, &names).map_err(|e| scope_error(e, "second"))?;
    Ok((positions1, positions2))
}

/// Non-ignored column names of `first`, which must equal those of `second`
fn shared_names<'a>(
    first: &'a Table,
    second: &Table,
    ignored: &[String],
) -> Result<Vec<&'a str>> {
    let kept = |name: &&str| !ignored.iter().any(|i| i == *name);

    if let Some(name) = first
        .column_names()
        .filter(kept)
        .find(|name| !second.has_column(name))
    {
        return Err(CheckError::comparison(format!(
            "column {} of the first table is missing from the second table",
            name
        )));
    }
    if let Some(name) = second
        .column_names()
        .filter(kept)
        .find(|name| !first.has_column(name))
    {
        return Err(CheckError::comparison(format!(
            "column {} of the second table is missing from the first table",
            name
        )));
    }

    Ok(first.column_names().filter(kept).collect())
}

fn scope_error(err: CheckError, side: &str) -> CheckError {
    match err {
        CheckError::Resolution { column } => CheckError::comparison(format!(
            "column {} not found in the {} table",
            column, side
        )),
        other => other,
    }
}

/// One-to-one pairing: each first-table row claims the earliest unclaimed
/// equal row of the second table
fn pair_rows<'a>(keys1: &[RowKey<'a>], keys2: &[RowKey<'a>]) -> (Vec<bool>, Vec<bool>) {
    let mut unclaimed: FxHashMap<&[&str], VecDeque<usize>> = FxHashMap::default();
    for (j, key) in keys2.iter().enumerate() {
        unclaimed.entry(key.as_slice()).or_default().push_back(j);
    }

    let mut found1 = vec![false; keys1.len()];
    let mut found2 = vec![false; keys2.len()];
    for (i, key) in keys1.iter().enumerate() {
        if let Some(j) = unclaimed
            .get_mut(key.as_slice())
            .and_then(VecDeque::pop_front)
        {
            found1[i] = true;
            found2[j] = true;
        }
    }
    (found1, found2)
}

/// Membership in the other table's distinct keys
fn member_rows<'a>(keys1: &[RowKey<'a>], keys2: &[RowKey<'a>]) -> (Vec<bool>, Vec<bool>) {
    let distinct1: FxHashSet<&[&str]> = keys1.iter().map(Vec::as_slice).collect();
    let distinct2: FxHashSet<&[&str]> = keys2.iter().map(Vec::as_slice).collect();

    let found1 = keys1.iter().map(|k| distinct2.contains(k.as_slice())).collect();
    let found2 = keys2.iter().map(|k| distinct1.contains(k.as_slice())).collect();
    (found1, found2)
}

/// Positional comparison of row i against row i
fn direct_rows<'a>(keys1: &[RowKey<'a>], keys2: &[RowKey<'a>]) -> Result<(Vec<bool>, Vec<bool>)> {
    if keys1.len() != keys2.len() {
        return Err(CheckError::comparison(format!(
            "direct method needs equal row counts, got {} and {}",
            keys1.len(),
            keys2.len()
        )));
    }

    let found: Vec<bool> = keys1.iter().zip(keys2).map(|(a, b)| a == b).collect();
    Ok((found.clone(), found))
}

/// Rows whose flag equals `want`, with their 1-based original positions
fn emit(table: &Table, found: &[bool], want: bool) -> (Table, Vec<usize>) {
    let positions: Vec<usize> = found
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f == want)
        .map(|(i, _)| i)
        .collect();
    let indices = positions.iter().map(|i| i + 1).collect();
    (table.take_rows(&positions), indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first() -> Table {
        Table::from_records([
            ["a", "b", "c"],
            ["1", "2", "3"],
            ["4", "5", "6"],
            ["7", "8", "9"],
            ["7", "8", "9"],
        ])
        .unwrap()
    }

    fn second() -> Table {
        Table::from_records([
            ["a", "b", "c"],
            ["7", "8", "9"],
            ["1", "2", "3"],
            ["1", "2", "3"],
            ["4", "5", "6"],
            ["7", "8", "9"],
            ["7", "8", "9"],
            ["10", "10", "10"],
        ])
        .unwrap()
    }

    fn run(method: Method, function: Function) -> Comparison {
        KeyMatcher
            .compare(&first(), &second(), &ColumnScope::All, method, function)
            .unwrap()
    }

    #[test]
    fn test_match_common_pairs_duplicates_once() {
        let result = run(Method::Match, Function::Common);
        assert_eq!(result.first_indices, vec![1, 2, 3, 4]);
        assert_eq!(result.second_indices, vec![1, 2, 4, 5]);
        assert_eq!(result.second.rows()[3].cells, vec!["7", "8", "9"]);
    }

    #[test]
    fn test_match_different_leaves_unclaimed_rows() {
        let result = run(Method::Match, Function::Different);
        assert_eq!(result.first.row_count(), 0);
        assert_eq!(result.second_indices, vec![3, 6, 7]);
    }

    #[test]
    fn test_set_ignores_multiplicity() {
        let common = run(Method::Set, Function::Common);
        assert_eq!(common.first_indices, vec![1, 2, 3, 4]);
        assert_eq!(common.second_indices, vec![1, 2, 3, 4, 5, 6]);

        let different = run(Method::Set, Function::Different);
        assert!(different.first_indices.is_empty());
        assert_eq!(different.second_indices, vec![7]);
    }

    #[test]
    fn test_direct_compares_positions() {
        let left = Table::from_records([["a"], ["1"], ["2"], ["3"]]).unwrap();
        let right = Table::from_records([["a"], ["1"], ["9"], ["3"]]).unwrap();
        let result = KeyMatcher
            .compare(&left, &right, &ColumnScope::All, Method::Direct, Function::Different)
            .unwrap();
        assert_eq!(result.first_indices, vec![2]);
        assert_eq!(result.second_indices, vec![2]);
        assert_eq!(result.second.rows()[0].cells, vec!["9"]);
    }

    #[test]
    fn test_direct_requires_equal_row_counts() {
        let err = KeyMatcher
            .compare(&first(), &second(), &ColumnScope::All, Method::Direct, Function::Common)
            .unwrap_err();
        assert!(matches!(err, CheckError::Comparison { .. }));
    }

    #[test]
    fn test_use_columns_resolve_by_name() {
        let left = Table::from_records([["a", "b", "c"], ["1", "2", "3"], ["4", "5", "6"], ["7", "8", "9"]])
            .unwrap();
        let right = Table::from_records([
            ["d", "a", "z"],
            ["a", "b", "c"],
            ["z", "1", "z"],
            ["z", "7", "z"],
            ["z", "7", "z"],
        ])
        .unwrap();
        let scope = ColumnScope::Use(vec!["a".into()]);

        let result = KeyMatcher
            .compare(&left, &right, &scope, Method::Match, Function::Different)
            .unwrap();

        assert_eq!(result.first.to_records(), vec![vec!["a", "b", "c"], vec!["4", "5", "6"]]);
        assert_eq!(result.second_indices, vec![1, 4]);
    }

    #[test]
    fn test_use_column_missing_from_one_table() {
        let left = Table::from_records([["a", "b"]]).unwrap();
        let right = Table::from_records([["a"]]).unwrap();
        let scope = ColumnScope::Use(vec!["b".into()]);
        let err = KeyMatcher
            .compare(&left, &right, &scope, Method::Set, Function::Common)
            .unwrap_err();
        assert_eq!(
            err,
            CheckError::comparison("column b not found in the second table")
        );
    }

    #[test]
    fn test_all_scope_needs_same_column_set() {
        let left = Table::from_records([["a", "b"]]).unwrap();
        let right = Table::from_records([["b", "c"]]).unwrap();
        assert!(KeyMatcher
            .compare(&left, &right, &ColumnScope::All, Method::Set, Function::Common)
            .is_err());
    }

    #[test]
    fn test_all_scope_tolerates_column_order() {
        let left = Table::from_records([["a", "b"], ["1", "2"]]).unwrap();
        let right = Table::from_records([["b", "a"], ["2", "1"]]).unwrap();
        let result = KeyMatcher
            .compare(&left, &right, &ColumnScope::All, Method::Match, Function::Common)
            .unwrap();
        assert_eq!(result.first_indices, vec![1]);
        assert_eq!(result.second_indices, vec![1]);
    }

    #[test]
    fn test_ignore_scope() {
        let left = Table::from_records([["id", "ts"], ["1", "morning"], ["2", "noon"]]).unwrap();
        let right = Table::from_records([["id", "ts", "extra"], ["1", "night", "x"]]).unwrap();
        let scope = ColumnScope::Ignore(vec!["ts".into(), "extra".into()]);

        let result = KeyMatcher
            .compare(&left, &right, &scope, Method::Set, Function::Common)
            .unwrap();

        assert_eq!(result.first_indices, vec![1]);
        assert_eq!(result.second_indices, vec![1]);
        // full rows come back, not just the scoped cells
        assert_eq!(result.second.rows()[0].cells, vec!["1", "night", "x"]);
    }

    #[test]
    fn test_ignore_unknown_column() {
        let scope = ColumnScope::Ignore(vec!["nope".into()]);
        assert!(KeyMatcher
            .compare(&first(), &second(), &scope, Method::Set, Function::Common)
            .is_err());
    }

    #[test]
    fn test_empty_scope_rejected() {
        let scope = ColumnScope::Use(Vec::new());
        let err = KeyMatcher
            .compare(&first(), &second(), &scope, Method::Set, Function::Common)
            .unwrap_err();
        assert_eq!(err, CheckError::comparison("no columns to compare"));
    }
}
