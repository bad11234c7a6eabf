use thiserror::Error;

use crate::types::LineItem;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Missing required line item: {0}")]
    MissingLineItem(LineItem),

    #[error("Duplicate line item: {0}")]
    DuplicateLineItem(String),

    #[error("Length mismatch for {item}: expected {expected} fiscal years, got {got}")]
    LengthMismatch {
        item: String,
        expected: usize,
        got: usize,
    },

    #[error("Statement table has no fiscal years")]
    EmptyTable,

    #[error("Insufficient history: need at least {needed} fiscal years, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Statement source error: {0}")]
    SourceError(String),
}
