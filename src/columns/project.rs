//! Keep/delete projections over result tables

use rustc_hash::FxHashSet;

use crate::config::CompareConfig;
use crate::error::{CheckError, Result};
use crate::model::Table;

/// Keep only the named columns, in the table's own column order
pub fn keep_columns<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Table> {
    let wanted = name_set(table, names)?;
    Ok(select_where(table, |name| wanted.contains(name)))
}

/// Drop the named columns, keeping the rest in order
pub fn delete_columns<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Table> {
    let unwanted = name_set(table, names)?;
    Ok(select_where(table, |name| !unwanted.contains(name)))
}

fn name_set<'a, S: AsRef<str>>(table: &Table, names: &'a [S]) -> Result<FxHashSet<&'a str>> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if table.has_column(name) {
                Ok(name)
            } else {
                Err(CheckError::resolution(name))
            }
        })
        .collect()
}

fn select_where(table: &Table, predicate: impl Fn(&str) -> bool) -> Table {
    let positions: Vec<usize> = table
        .column_names()
        .enumerate()
        .filter(|(_, name)| predicate(name))
        .map(|(i, _)| i)
        .collect();
    table.select(&positions)
}

/// Column filter applied to both outputs of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Leave both outputs as they are
    #[default]
    All,
    Keep(Vec<String>),
    Delete(Vec<String>),
}

impl Projection {
    /// Pick the projection a validated config asks for
    pub fn from_config(config: &CompareConfig) -> Self {
        match (&config.keep_columns, &config.delete_columns) {
            (Some(keep), _) => Projection::Keep(keep.clone()),
            (None, Some(delete)) => Projection::Delete(delete.clone()),
            (None, None) => Projection::All,
        }
    }

    /// Apply to an output pair
    ///
    /// A listed name only needs to exist in one of the two tables; it is
    /// skipped for the table lacking it. A name neither table has is an error.
    pub fn apply(&self, first: Table, second: Table) -> Result<(Table, Table)> {
        let names = match self {
            Projection::All => return Ok((first, second)),
            Projection::Keep(names) | Projection::Delete(names) => names,
        };

        if let Some(unknown) = names
            .iter()
            .find(|name| !first.has_column(name) && !second.has_column(name))
        {
            return Err(CheckError::resolution(unknown.as_str()));
        }

        let project = |table: &Table| -> Result<Table> {
            let present: Vec<&str> = names
                .iter()
                .map(String::as_str)
                .filter(|name| table.has_column(name))
                .collect();
            match self {
                Projection::Keep(_) => keep_columns(table, &present),
                _ => delete_columns(table, &present),
            }
        };

        Ok((project(&first)?, project(&second)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records([["a", "b", "c"], ["1", "2", "3"]]).unwrap()
    }

    #[test]
    fn test_keep_preserves_table_order() {
        let kept = keep_columns(&sample(), &["c", "a"]).unwrap();
        assert_eq!(kept.to_records(), vec![vec!["a", "c"], vec!["1", "3"]]);
    }

    #[test]
    fn test_delete_columns() {
        let rest = delete_columns(&sample(), &["b"]).unwrap();
        assert_eq!(rest.to_records(), vec![vec!["a", "c"], vec!["1", "3"]]);
        let nothing: [&str; 0] = [];
        assert_eq!(delete_columns(&sample(), &nothing).unwrap(), sample());
    }

    #[test]
    fn test_absent_column_is_an_error() {
        assert_eq!(
            keep_columns(&sample(), &["a", "q"]).unwrap_err(),
            CheckError::resolution("q")
        );
        assert!(delete_columns(&sample(), &["q"]).is_err());
    }

    #[test]
    fn test_pair_keep_skips_names_missing_from_one_side() {
        let first = sample();
        let second = Table::from_records([["a", "d", "z"], ["b", "a", "c"]]).unwrap();
        let keep = Projection::Keep(vec!["a".into(), "z".into(), "c".into()]);

        let (first, second) = keep.apply(first, second).unwrap();

        assert_eq!(first.to_records(), vec![vec!["a", "c"], vec!["1", "3"]]);
        assert_eq!(second.to_records(), vec![vec!["a", "z"], vec!["b", "c"]]);
    }

    #[test]
    fn test_pair_delete() {
        let second = Table::from_records([["a", "d", "z"], ["b", "a", "c"]]).unwrap();
        let delete = Projection::Delete(vec!["a".into(), "c".into()]);

        let (first, second) = delete.apply(sample(), second).unwrap();

        assert_eq!(first.to_records(), vec![vec!["b"], vec!["2"]]);
        assert_eq!(second.to_records(), vec![vec!["d", "z"], vec!["a", "c"]]);
    }

    #[test]
    fn test_pair_rejects_name_absent_from_both() {
        let keep = Projection::Keep(vec!["a".into(), "nope".into()]);
        assert_eq!(
            keep.apply(sample(), sample()).unwrap_err(),
            CheckError::resolution("nope")
        );
    }
}
