//! Table types produced by the builder and the normalizer.

use crate::tables::error::TableError;
use polars::prelude::DataFrame;

/// Column names of a merged table, in output order.
pub mod columns {
    pub const DATE: &str = "date";
    pub const TEMP_MORNING: &str = "temp_morning";
    pub const TEMP_DAY: &str = "temp_day";
    pub const TEMP_EVENING: &str = "temp_evening";
    pub const TEMP_NIGHT: &str = "temp_night";
    pub const TEMP_MIN: &str = "temp_min";
    pub const TEMP_MAX: &str = "temp_max";
    pub const TEMP_AVG: &str = "temp_avg";
    pub const RAIN: &str = "rain";
    pub const SNOW: &str = "snow";
    pub const PROBABILITY: &str = "probability";
    pub const WIND_SPEED: &str = "wind_speed";
    pub const WIND_DEGREES: &str = "wind_degrees";

    pub(crate) const TIMESTAMP: &str = "timestamp";
    pub(crate) const TIMEZONE_OFFSET: &str = "timezone_offset";
}

/// One row per day (per month for historical data) for a single location.
///
/// The frame holds a `date` string column (`DD.MM.YYYY`) followed by the
/// temperature, precipitation and, when available, wind columns.
#[derive(Debug, Clone)]
pub struct MergedTable {
    pub location: String,
    pub frame: DataFrame,
}

impl MergedTable {
    pub fn new(location: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            location: location.into(),
            frame,
        }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_wind(&self) -> bool {
        self.has_column(columns::WIND_SPEED)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .iter()
            .any(|column| column.as_str() == name)
    }

    /// The `date` column in row order.
    pub fn dates(&self) -> Result<Vec<String>, TableError> {
        Ok(self
            .frame
            .column(columns::DATE)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect())
    }

    /// A float column in row order; missing values stay `None`.
    pub fn values(&self, column: &str) -> Result<Vec<Option<f64>>, TableError> {
        if !self.has_column(column) {
            return Err(TableError::MissingColumn {
                location: self.location.clone(),
                column: column.to_string(),
            });
        }
        Ok(self.frame.column(column)?.f64()?.into_iter().collect())
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}

/// Tables of several locations reduced to the dates they all share.
///
/// Every table has the same `date` values at the same row positions.
#[derive(Debug, Clone)]
pub struct NormalizedTableSet {
    tables: Vec<MergedTable>,
}

impl NormalizedTableSet {
    pub(crate) fn new(tables: Vec<MergedTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[MergedTable] {
        &self.tables
    }

    pub fn get(&self, location: &str) -> Option<&MergedTable> {
        self.tables.iter().find(|table| table.location == location)
    }

    pub fn locations(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.location.as_str()).collect()
    }

    /// The shared date axis, taken from the first table.
    pub fn dates(&self) -> Result<Vec<String>, TableError> {
        match self.tables.first() {
            Some(table) => table.dates(),
            None => Ok(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergedTable> {
        self.tables.iter()
    }

    pub fn into_tables(self) -> Vec<MergedTable> {
        self.tables
    }
}

impl IntoIterator for NormalizedTableSet {
    type Item = MergedTable;
    type IntoIter = std::vec::IntoIter<MergedTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

impl<'a> IntoIterator for &'a NormalizedTableSet {
    type Item = &'a MergedTable;
    type IntoIter = std::slice::Iter<'a, MergedTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
