//! Comparison pipeline: scope resolution, alignment, comparison, annotation,
//! projection and rearrangement of two tables

use std::borrow::Cow;

use log::{debug, info};

use crate::columns::{auto_align, common_columns, rearrange, Projection};
use crate::compare::{annotate, ColumnScope, KeyMatcher, RowComparator};
use crate::config::CompareConfig;
use crate::error::Result;
use crate::model::Table;

/// The two result tables of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutput {
    /// Rows emitted from the first table
    pub first: Table,
    /// Rows emitted from the second table
    pub second: Table,
}

/// Main comparison pipeline
pub struct Pipeline {
    config: CompareConfig,
    comparator: Box<dyn RowComparator>,
}

impl Pipeline {
    /// Create a pipeline using the built-in key matcher
    pub fn new(config: CompareConfig) -> Self {
        Self::with_comparator(config, Box::new(KeyMatcher::new()))
    }

    /// Create a pipeline using a custom row comparator
    pub fn with_comparator(config: CompareConfig, comparator: Box<dyn RowComparator>) -> Self {
        Self { config, comparator }
    }

    /// Run every stage over two tables
    ///
    /// Inputs are never modified. The first failing stage aborts the run and
    /// no partial output is returned.
    pub fn run(&self, first: &Table, second: &Table) -> Result<CheckOutput> {
        let config = &self.config;

        debug!("validating configuration");
        let function = config.validate()?;

        debug!("resolving column scope");
        let scope = self.resolve_scope(first, second);

        let (first, second): (Cow<'_, Table>, Cow<'_, Table>) = if config.auto_align {
            debug!("aligning columns");
            let (first, second) = auto_align(first, second);
            (Cow::Owned(first), Cow::Owned(second))
        } else {
            (Cow::Borrowed(first), Cow::Borrowed(second))
        };

        debug!("comparing rows ({} {})", config.method, function);
        let comparison =
            self.comparator
                .compare(&first, &second, &scope, config.method, function)?;
        info!(
            "{} {} rows: {} of {} from the first table, {} of {} from the second",
            config.method,
            function,
            comparison.first.row_count(),
            first.row_count(),
            comparison.second.row_count(),
            second.row_count()
        );

        let (result1, result2) = if config.keep_index {
            debug!("annotating original row positions");
            (
                annotate(&comparison.first, &comparison.first_indices)?,
                annotate(&comparison.second, &comparison.second_indices)?,
            )
        } else {
            (comparison.first, comparison.second)
        };

        debug!("projecting columns");
        let (mut result1, mut result2) = Projection::from_config(config).apply(result1, result2)?;

        if let Some(order) = &config.arrangement1 {
            debug!("rearranging first result");
            result1 = rearrange(&result1, order)?;
        }
        if let Some(order) = &config.arrangement2 {
            debug!("rearranging second result");
            result2 = rearrange(&result2, order)?;
        }

        Ok(CheckOutput {
            first: result1,
            second: result2,
        })
    }

    /// Column scope the config asks for, with common columns taken from the
    /// unaligned inputs
    fn resolve_scope(&self, first: &Table, second: &Table) -> ColumnScope {
        let config = &self.config;
        if config.use_common_columns {
            let common = common_columns(first, second);
            debug!("using {} common column(s)", common.len());
            ColumnScope::Use(common)
        } else if let Some(columns) = &config.use_columns {
            ColumnScope::Use(columns.clone())
        } else if let Some(columns) = &config.ignore_columns {
            ColumnScope::Ignore(columns.clone())
        } else {
            ColumnScope::All
        }
    }
}

/// Convenience function to run the pipeline once
pub fn run_check(first: &Table, second: &Table, config: &CompareConfig) -> Result<CheckOutput> {
    Pipeline::new(config.clone()).run(first, second)
}
