use crate::types::day::DayIdKind;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Records for '{location}' mix day identities, expected every record to use a {expected}")]
    MixedDayIdentity {
        location: String,
        expected: DayIdKind,
    },

    #[error("Cannot normalize an empty list of tables")]
    NoTables,

    #[error("Table for '{location}' has no column '{column}'")]
    MissingColumn { location: String, column: String },
}
