//! Reshapes a [`NormalizedTableSet`] into the frames the charts read from.
//!
//! Every frame is a plain polars [`DataFrame`], so callers can also feed them
//! to their own plotting or export code.

use crate::tables::error::TableError;
use crate::tables::merged_table::columns;
use crate::tables::merged_table::NormalizedTableSet;
use polars::prelude::*;
use std::fmt;

/// A chartable column of a merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TempMorning,
    TempDay,
    TempEvening,
    TempNight,
    TempMin,
    TempMax,
    TempAvg,
    Rain,
    Snow,
    Probability,
    WindSpeed,
}

impl Metric {
    pub fn column(&self) -> &'static str {
        match self {
            Metric::TempMorning => columns::TEMP_MORNING,
            Metric::TempDay => columns::TEMP_DAY,
            Metric::TempEvening => columns::TEMP_EVENING,
            Metric::TempNight => columns::TEMP_NIGHT,
            Metric::TempMin => columns::TEMP_MIN,
            Metric::TempMax => columns::TEMP_MAX,
            Metric::TempAvg => columns::TEMP_AVG,
            Metric::Rain => columns::RAIN,
            Metric::Snow => columns::SNOW,
            Metric::Probability => columns::PROBABILITY,
            Metric::WindSpeed => columns::WIND_SPEED,
        }
    }

    /// Axis label including the unit.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Metric::Rain | Metric::Snow => "Total (mm)",
            Metric::Probability => "Probability",
            Metric::WindSpeed => "Wind Speed (m/s)",
            _ => "Temperature (°C)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// The four time-of-day temperatures reported by the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Day,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn metric(&self) -> Metric {
        match self {
            TimeOfDay::Morning => Metric::TempMorning,
            TimeOfDay::Day => Metric::TempDay,
            TimeOfDay::Evening => Metric::TempEvening,
            TimeOfDay::Night => Metric::TempNight,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Day => "Day",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        };
        write!(f, "{name}")
    }
}

pub const LOCATION: &str = "location";
pub const TOTAL: &str = "total";
pub const VALUE: &str = "value";

/// Wide frame: `date` followed by one column per location holding `metric`.
pub fn series_frame(set: &NormalizedTableSet, metric: Metric) -> Result<DataFrame, TableError> {
    let mut frame_columns = vec![Column::new(columns::DATE.into(), set.dates()?)];
    for table in set {
        frame_columns.push(Column::new(
            table.location.as_str().into(),
            table.values(metric.column())?,
        ));
    }
    Ok(DataFrame::new(frame_columns)?)
}

/// Wide frame: `date` followed by `<location> min` and `<location> max` pairs.
pub fn range_frame(set: &NormalizedTableSet) -> Result<DataFrame, TableError> {
    let mut frame_columns = vec![Column::new(columns::DATE.into(), set.dates()?)];
    for table in set {
        frame_columns.push(Column::new(
            format!("{} min", table.location).into(),
            table.values(columns::TEMP_MIN)?,
        ));
        frame_columns.push(Column::new(
            format!("{} max", table.location).into(),
            table.values(columns::TEMP_MAX)?,
        ));
    }
    Ok(DataFrame::new(frame_columns)?)
}

/// One row per location: `location` and the `total` of `metric`. Missing values
/// are skipped.
pub fn totals_frame(set: &NormalizedTableSet, metric: Metric) -> Result<DataFrame, TableError> {
    let mut locations = Vec::with_capacity(set.len());
    let mut totals = Vec::with_capacity(set.len());
    for table in set {
        locations.push(table.location.clone());
        totals.push(table.values(metric.column())?.into_iter().flatten().sum::<f64>());
    }
    Ok(df!(LOCATION => locations, TOTAL => totals)?)
}

/// Long frame with one row per location and date: `date`, `location`, `value`.
pub fn heatmap_frame(set: &NormalizedTableSet, metric: Metric) -> Result<DataFrame, TableError> {
    let mut dates = Vec::new();
    let mut locations = Vec::new();
    let mut values = Vec::new();
    for table in set {
        let table_values = table.values(metric.column())?;
        for (date, value) in table.dates()?.into_iter().zip(table_values) {
            dates.push(date);
            locations.push(table.location.clone());
            values.push(value);
        }
    }
    Ok(df!(columns::DATE => dates, LOCATION => locations, VALUE => values)?)
}
