//! Error types for csvcheck operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckError>;

/// Why an arrangement is not a permutation of a table's header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RearrangeFault {
    /// Named in the arrangement but absent from the table
    Unknown,
    /// Present in the table but absent from the arrangement
    Missing,
    /// Named more than once in the arrangement
    Duplicate,
}

impl std::fmt::Display for RearrangeFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RearrangeFault::Unknown => write!(f, "unknown"),
            RearrangeFault::Missing => write!(f, "missing"),
            RearrangeFault::Duplicate => write!(f, "duplicate"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("invalid table: {message}")]
    InvalidTable { message: String },

    #[error("column not found: {column}")]
    Resolution { column: String },

    #[error("comparison error: {message}")]
    Comparison { message: String },

    #[error("rearrangement error: {fault} column {column}")]
    Rearrangement {
        column: String,
        fault: RearrangeFault,
    },
}

impl CheckError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    pub fn invalid_table(msg: impl Into<String>) -> Self {
        Self::InvalidTable {
            message: msg.into(),
        }
    }

    pub fn resolution(column: impl Into<String>) -> Self {
        Self::Resolution {
            column: column.into(),
        }
    }

    pub fn comparison(msg: impl Into<String>) -> Self {
        Self::Comparison {
            message: msg.into(),
        }
    }

    pub fn rearrangement(column: impl Into<String>, fault: RearrangeFault) -> Self {
        Self::Rearrangement {
            column: column.into(),
            fault,
        }
    }
}
