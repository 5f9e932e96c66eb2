//! csvcheck - Reconcile two tabular exports
//!
//! Compares two CSV tables and produces the rows they have in common or that
//! differ, under configurable row-matching semantics and column selection.

pub mod columns;
pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::{CompareConfig, Config, Function, Method};
pub use error::{CheckError, Result};
pub use model::Table;
pub use pipeline::{run_check, CheckOutput, Pipeline};
