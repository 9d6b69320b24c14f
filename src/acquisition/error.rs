use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    ResponseBody(String, #[source] reqwest::Error),

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No location found for query '{0}'")]
    LocationNotFound(String),

    #[error("Forecast response for '{0}' contained no daily data")]
    EmptyForecast(String),

    #[error("Failed to read CSV file '{}'", .path.display())]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error(
        "CSV column count ({found}) does not match the expected {expected} columns in '{}'",
        .path.display()
    )]
    SchemaMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Invalid year-month date '{value}' in CSV data")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Missing value in column '{column}' of CSV row {row}")]
    MissingValue { column: &'static str, row: usize },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}

impl AcquisitionError {
    /// `true` when the upstream answered but had nothing for the request, as opposed
    /// to a transport, status or parsing failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AcquisitionError::LocationNotFound(_) | AcquisitionError::EmptyForecast(_)
        )
    }
}
