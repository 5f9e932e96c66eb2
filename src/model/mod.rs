//! Data model for tabular data representation

mod key;
mod table;

pub use key::{KeyBuilder, RowKey};
pub use table::{Row, Table};
