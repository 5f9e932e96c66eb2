//! Row comparison between two tables

mod annotate;
mod matcher;

use crate::config::{Function, Method};
use crate::error::Result;
use crate::model::Table;

pub use annotate::{annotate, INDEX_COLUMN};
pub use matcher::KeyMatcher;

/// Columns whose values decide row equality
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnScope {
    /// Every column; both tables must have the same column set
    #[default]
    All,
    /// Only these columns, which both tables must have
    Use(Vec<String>),
    /// Every column except these
    Ignore(Vec<String>),
}

/// Emitted rows of both tables plus their original 1-based positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub first: Table,
    pub first_indices: Vec<usize>,
    pub second: Table,
    pub second_indices: Vec<usize>,
}

/// Capability that selects the common or different rows of two tables
///
/// Implementations return rows in original order with full column content;
/// the scope only decides membership.
pub trait RowComparator: Send + Sync {
    fn compare(
        &self,
        first: &Table,
        second: &Table,
        scope: &ColumnScope,
        method: Method,
        function: Function,
    ) -> Result<Comparison>;
}
