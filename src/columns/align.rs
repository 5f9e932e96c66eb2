//! Auto-alignment of two tables by shared column names

use log::debug;

use crate::model::Table;

use super::resolve::common_columns;

/// Reorder both tables so shared columns lead in the same order
///
/// Shared columns come first, ordered by `first`'s header; each table's
/// remaining columns follow in their original relative order. Rows and cell
/// contents are untouched.
pub fn auto_align(first: &Table, second: &Table) -> (Table, Table) {
    let shared = common_columns(first, second);
    debug!("auto-aligning on {} shared column(s)", shared.len());
    (align_to(first, &shared), align_to(second, &shared))
}

fn align_to(table: &Table, shared: &[String]) -> Table {
    let mut positions: Vec<usize> = shared
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    positions.extend(
        table
            .column_names()
            .enumerate()
            .filter(|(_, name)| !shared.iter().any(|s| s == *name))
            .map(|(i, _)| i),
    );
    table.select(&positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_columns_move_to_front() {
        let first = Table::from_records([["a", "b", "c"], ["1", "2", "3"]]).unwrap();
        let second = Table::from_records([["d", "a", "z"], ["a", "b", "c"]]).unwrap();

        let (first, second) = auto_align(&first, &second);

        assert_eq!(first.to_records(), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
        assert_eq!(second.to_records(), vec![vec!["a", "d", "z"], vec!["b", "a", "c"]]);
    }

    #[test]
    fn test_shared_order_matches_on_both_sides() {
        let first = Table::from_records([["x", "c", "a"], ["1", "2", "3"]]).unwrap();
        let second = Table::from_records([["a", "y", "c"], ["4", "5", "6"]]).unwrap();

        let (first, second) = auto_align(&first, &second);

        let names1: Vec<&str> = first.column_names().collect();
        let names2: Vec<&str> = second.column_names().collect();
        assert_eq!(names1, vec!["c", "a", "x"]);
        assert_eq!(names2, vec!["c", "a", "y"]);
        assert_eq!(second.rows()[0].cells, vec!["6", "4", "5"]);
    }

    #[test]
    fn test_disjoint_headers_unchanged() {
        let first = Table::from_records([["a", "b"]]).unwrap();
        let second = Table::from_records([["c", "d"]]).unwrap();
        let (aligned1, aligned2) = auto_align(&first, &second);
        assert_eq!(aligned1, first);
        assert_eq!(aligned2, second);
    }
}
