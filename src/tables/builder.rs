//! Merges a location's temperature, precipitation and wind records into one
//! row-per-day table.

use crate::tables::error::TableError;
use crate::tables::merged_table::columns::*;
use crate::tables::merged_table::MergedTable;
use crate::types::day::{DayId, DayIdKind, DayRecord, DATE_FORMAT};
use crate::types::location::LocationWeatherData;
use crate::types::records::{PrecipitationRecord, TemperatureRecord, WindRecord};
use chrono::DateTime;
use log::debug;
use polars::prelude::*;

/// Builds the merged table for one location.
///
/// The record lists are flattened into frames and inner-joined on the day key
/// (`timestamp` for forecast data, the calendar date for historical data). Days
/// missing from any list are dropped without error. Wind is only joined when
/// the location has wind records. The result is ordered by day and carries a
/// `DD.MM.YYYY` `date` column instead of the raw timestamp and offset.
///
/// # Errors
///
/// * [`TableError::MixedDayIdentity`] if the records mix timestamp and calendar
///   date identities.
/// * [`TableError::DataFrameProcessing`] if a polars operation fails.
pub fn build_table(data: &LocationWeatherData) -> Result<MergedTable, TableError> {
    let location = data.location_name.as_str();
    let kind = day_kind(data);
    let key = match kind {
        DayIdKind::Timestamp => TIMESTAMP,
        DayIdKind::Date => DATE,
    };

    let temperature = temperature_frame(&data.temperature, kind, location)?.lazy();
    let precipitation = precipitation_frame(&data.precipitation, kind, location)?.lazy();

    let mut merged = temperature.join(
        precipitation,
        [col(key)],
        [col(key)],
        JoinArgs::new(JoinType::Inner),
    );
    if data.has_wind() {
        let wind = wind_frame(&data.wind, kind, location)?.lazy();
        merged = merged.join(wind, [col(key)], [col(key)], JoinArgs::new(JoinType::Inner));
    }

    let frame = merged
        .sort_by_exprs([col(key)], SortMultipleOptions::default())
        .select(output_columns(kind, data.has_wind()))
        .collect()?;

    let dropped = data.temperature.len().saturating_sub(frame.height());
    if dropped > 0 {
        debug!(
            "{} temperature rows for '{}' had no matching day in the other records",
            dropped, location
        );
    }
    Ok(MergedTable::new(location, frame))
}

/// Builds the merged table of every location, in input order.
pub fn build_tables(data: &[LocationWeatherData]) -> Result<Vec<MergedTable>, TableError> {
    data.iter().map(build_table).collect()
}

/// The identity mode of the location, taken from its first record.
fn day_kind(data: &LocationWeatherData) -> DayIdKind {
    data.temperature
        .first()
        .map(|r| r.day.kind())
        .or_else(|| data.precipitation.first().map(|r| r.day.kind()))
        .or_else(|| data.wind.first().map(|r| r.day.kind()))
        .unwrap_or(DayIdKind::Timestamp)
}

/// Derives the `date` label and fixes the output column order. Raw key columns
/// are not selected, so `timestamp` and `timezone_offset` never reach the output.
fn output_columns(kind: DayIdKind, with_wind: bool) -> Vec<Expr> {
    let date = match kind {
        DayIdKind::Timestamp => ((col(TIMESTAMP) + col(TIMEZONE_OFFSET)) * lit(1000i64))
            .cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
        DayIdKind::Date => col(DATE).cast(DataType::Date),
    };

    let mut exprs = vec![
        date.dt().strftime(DATE_FORMAT).alias(DATE),
        col(TEMP_MORNING),
        col(TEMP_DAY),
        col(TEMP_EVENING),
        col(TEMP_NIGHT),
        col(TEMP_MIN),
        col(TEMP_MAX),
        col(TEMP_AVG),
        col(RAIN),
        col(SNOW),
        col(PROBABILITY),
    ];
    if with_wind {
        exprs.push(col(WIND_SPEED));
        exprs.push(col(WIND_DEGREES));
    }
    exprs
}

/// Day-key columns of a record list. Timestamp data yields `timestamp` and,
/// when `with_offset` is set, `timezone_offset`; date data yields `date` as days
/// since the Unix epoch.
fn key_columns<R: DayRecord>(
    records: &[R],
    kind: DayIdKind,
    with_offset: bool,
    location: &str,
) -> Result<Vec<Column>, TableError> {
    let mixed = || TableError::MixedDayIdentity {
        location: location.to_string(),
        expected: kind,
    };

    match kind {
        DayIdKind::Timestamp => {
            let mut timestamps = Vec::with_capacity(records.len());
            let mut offsets = Vec::with_capacity(records.len());
            for record in records {
                match record.day() {
                    DayId::Timestamp {
                        timestamp,
                        timezone_offset,
                    } => {
                        timestamps.push(*timestamp);
                        offsets.push(i64::from(*timezone_offset));
                    }
                    DayId::Date(_) => return Err(mixed()),
                }
            }
            let mut key = vec![Column::new(TIMESTAMP.into(), timestamps)];
            if with_offset {
                key.push(Column::new(TIMEZONE_OFFSET.into(), offsets));
            }
            Ok(key)
        }
        DayIdKind::Date => {
            let epoch = DateTime::UNIX_EPOCH.date_naive();
            let days = records
                .iter()
                .map(|record| match record.day() {
                    DayId::Date(date) => Ok(date.signed_duration_since(epoch).num_days() as i32),
                    DayId::Timestamp { .. } => Err(mixed()),
                })
                .collect::<Result<Vec<i32>, TableError>>()?;
            Ok(vec![Column::new(DATE.into(), days)])
        }
    }
}

fn temperature_frame(
    records: &[TemperatureRecord],
    kind: DayIdKind,
    location: &str,
) -> Result<DataFrame, TableError> {
    let mut columns = key_columns(records, kind, true, location)?;
    let field = |name: &str, get: fn(&TemperatureRecord) -> Option<f64>| {
        Column::new(name.into(), records.iter().map(get).collect::<Vec<_>>())
    };
    columns.extend([
        field(TEMP_MORNING, |r| r.morning),
        field(TEMP_DAY, |r| r.day_temp),
        field(TEMP_EVENING, |r| r.evening),
        field(TEMP_NIGHT, |r| r.night),
        field(TEMP_MIN, |r| r.min),
        field(TEMP_MAX, |r| r.max),
        field(TEMP_AVG, TemperatureRecord::resolved_average),
    ]);
    Ok(DataFrame::new(columns)?)
}

fn precipitation_frame(
    records: &[PrecipitationRecord],
    kind: DayIdKind,
    location: &str,
) -> Result<DataFrame, TableError> {
    let mut columns = key_columns(records, kind, false, location)?;
    columns.extend([
        Column::new(RAIN.into(), records.iter().map(|r| r.rain).collect::<Vec<_>>()),
        Column::new(SNOW.into(), records.iter().map(|r| r.snow).collect::<Vec<_>>()),
        Column::new(
            PROBABILITY.into(),
            records.iter().map(|r| r.probability).collect::<Vec<_>>(),
        ),
    ]);
    Ok(DataFrame::new(columns)?)
}

fn wind_frame(
    records: &[WindRecord],
    kind: DayIdKind,
    location: &str,
) -> Result<DataFrame, TableError> {
    let mut columns = key_columns(records, kind, false, location)?;
    columns.extend([
        Column::new(
            WIND_SPEED.into(),
            records.iter().map(|r| r.speed).collect::<Vec<_>>(),
        ),
        Column::new(
            WIND_DEGREES.into(),
            records.iter().map(|r| r.degrees).collect::<Vec<_>>(),
        ),
    ]);
    Ok(DataFrame::new(columns)?)
}
