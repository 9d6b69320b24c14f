//! Loader for historical monthly records stored as CSV.
//!
//! The file has a header row and six columns in fixed order: year-month date,
//! average, maximum and minimum temperature, precipitation and location name.

use crate::acquisition::error::AcquisitionError;
use crate::types::day::DayId;
use crate::types::location::LocationWeatherData;
use crate::types::records::{PrecipitationRecord, TemperatureRecord};
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

const CSV_COLUMNS: [&str; 6] = [
    "date",
    "temp_avg",
    "temp_max",
    "temp_min",
    "precipitation",
    "location_name",
];

#[derive(Debug, Clone, PartialEq)]
struct MonthlyRow {
    date: NaiveDate,
    temp_avg: Option<f64>,
    temp_max: Option<f64>,
    temp_min: Option<f64>,
    precipitation: Option<f64>,
}

/// Loads a historical CSV file into one [`LocationWeatherData`] per location.
///
/// Numeric columns are coerced to `f64`; cells that cannot be read as numbers
/// become missing. Missing temperatures are replaced by the mean of the present
/// values of the same column for the same location, missing precipitation by
/// zero. Locations are returned ordered by name, rows in file order. Only
/// temperature and precipitation records are produced.
///
/// # Errors
///
/// * [`AcquisitionError::CsvRead`] if the file cannot be opened or parsed.
/// * [`AcquisitionError::SchemaMismatch`] if the file does not have six columns.
/// * [`AcquisitionError::InvalidDate`] / [`AcquisitionError::MissingValue`] for
///   unreadable dates or missing location names.
pub fn load_historical_csv(path: impl AsRef<Path>) -> Result<Vec<LocationWeatherData>, AcquisitionError> {
    let path = path.as_ref();
    info!("Loading historical weather data from {:?}", path);

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        // Whole-file inference, so a decimal after many integer rows cannot fail the read.
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| AcquisitionError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .finish()
        .map_err(|e| AcquisitionError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if df.width() != CSV_COLUMNS.len() {
        return Err(AcquisitionError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: CSV_COLUMNS.len(),
            found: df.width(),
        });
    }
    df.set_column_names(CSV_COLUMNS)?;

    let grouped = group_rows(&df)?;
    let locations: Vec<LocationWeatherData> = grouped
        .into_iter()
        .map(|(location_name, mut rows)| {
            impute_missing(&mut rows);
            to_location_data(location_name, rows)
        })
        .collect();

    info!(
        "Loaded {} locations from {:?}",
        locations.len(),
        path
    );
    Ok(locations)
}

/// `NaN` cells count as missing.
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AcquisitionError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, AcquisitionError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

fn parse_year_month(value: &str) -> Result<NaiveDate, AcquisitionError> {
    let value = value.trim();
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").map_err(|source| {
        AcquisitionError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

/// Groups rows by location name, keeping file order inside each group.
fn group_rows(df: &DataFrame) -> Result<BTreeMap<String, Vec<MonthlyRow>>, AcquisitionError> {
    let dates = string_column(df, "date")?;
    let locations = string_column(df, "location_name")?;
    let temp_avg = float_column(df, "temp_avg")?;
    let temp_max = float_column(df, "temp_max")?;
    let temp_min = float_column(df, "temp_min")?;
    let precipitation = float_column(df, "precipitation")?;

    let mut grouped: BTreeMap<String, Vec<MonthlyRow>> = BTreeMap::new();
    for row in 0..df.height() {
        let location = locations[row]
            .clone()
            .ok_or(AcquisitionError::MissingValue {
                column: "location_name",
                row,
            })?;
        let date = dates[row]
            .as_deref()
            .ok_or(AcquisitionError::MissingValue {
                column: "date",
                row,
            })
            .and_then(parse_year_month)?;

        grouped.entry(location).or_default().push(MonthlyRow {
            date,
            temp_avg: temp_avg[row],
            temp_max: temp_max[row],
            temp_min: temp_min[row],
            precipitation: precipitation[row],
        });
    }
    Ok(grouped)
}

fn mean_of_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Fills gaps within one location's rows.
fn impute_missing(rows: &mut [MonthlyRow]) {
    let avg_mean = mean_of_present(rows.iter().map(|r| r.temp_avg));
    let max_mean = mean_of_present(rows.iter().map(|r| r.temp_max));
    let min_mean = mean_of_present(rows.iter().map(|r| r.temp_min));

    let mut filled = 0usize;
    for row in rows.iter_mut() {
        for (value, mean) in [
            (&mut row.temp_avg, avg_mean),
            (&mut row.temp_max, max_mean),
            (&mut row.temp_min, min_mean),
        ] {
            if value.is_none() && mean.is_some() {
                *value = mean;
                filled += 1;
            }
        }
        if row.precipitation.is_none() {
            row.precipitation = Some(0.0);
            filled += 1;
        }
    }
    if filled > 0 {
        debug!("Imputed {} missing values", filled);
    }
}

fn to_location_data(location_name: String, rows: Vec<MonthlyRow>) -> LocationWeatherData {
    let mut temperature = Vec::with_capacity(rows.len());
    let mut precipitation = Vec::with_capacity(rows.len());
    for row in rows {
        let day = DayId::Date(row.date);
        temperature.push(TemperatureRecord {
            day,
            morning: None,
            day_temp: None,
            evening: None,
            night: None,
            min: row.temp_min,
            max: row.temp_max,
            average: row.temp_avg,
        });
        precipitation.push(PrecipitationRecord {
            day,
            rain: row.precipitation.unwrap_or(0.0),
            snow: 0.0,
            probability: 0.0,
        });
    }

    LocationWeatherData {
        location_name,
        coordinates: None,
        temperature,
        precipitation,
        wind: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn row(month: u32, max: Option<f64>) -> MonthlyRow {
        MonthlyRow {
            date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            temp_avg: Some(5.0),
            temp_max: max,
            temp_min: Some(1.0),
            precipitation: None,
        }
    }

    #[test]
    fn imputes_group_mean_and_zero_precipitation() {
        let mut rows = vec![row(1, Some(10.0)), row(2, None), row(3, Some(20.0))];
        impute_missing(&mut rows);
        assert_eq!(rows[1].temp_max, Some(15.0));
        assert!(rows.iter().all(|r| r.precipitation == Some(0.0)));
    }

    #[test]
    fn all_missing_column_stays_missing() {
        let mut rows = vec![row(1, None), row(2, None)];
        impute_missing(&mut rows);
        assert_eq!(rows[0].temp_max, None);
        assert_eq!(rows[1].temp_max, None);
    }

    #[test]
    fn year_month_parsing() {
        assert_eq!(
            parse_year_month("2024-07").unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
        assert!(matches!(
            parse_year_month("July 2024"),
            Err(AcquisitionError::InvalidDate { .. })
        ));
    }

    #[test]
    fn groups_by_location_in_name_order() -> Result<(), AcquisitionError> {
        let file = write_csv(
            "DATE,TAVG,TMAX,TMIN,PRCP,CITY\n\
             2024-01,1.5,4.0,-1.0,30.2,Zurich\n\
             2024-01,27.0,31.0,24.0,250.0,Singapore\n\
             2024-02,2.5,,0.0,,Zurich\n\
             2024-03,6.0,12.0,1.0,45.0,Zurich\n",
        );

        let locations = load_historical_csv(file.path())?;

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].location_name, "Singapore");
        assert_eq!(locations[1].location_name, "Zurich");

        let zurich = &locations[1];
        assert_eq!(zurich.temperature.len(), 3);
        assert!(zurich.wind.is_empty());
        assert_eq!(zurich.coordinates, None);
        assert_eq!(zurich.temperature[1].max, Some(8.0));
        assert_eq!(zurich.temperature[1].average, Some(2.5));
        assert_eq!(zurich.temperature[1].morning, None);
        assert_eq!(zurich.precipitation[1].rain, 0.0);
        assert_eq!(
            zurich.temperature[2].day,
            DayId::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        Ok(())
    }

    #[test]
    fn decimal_after_many_integer_rows_loads() -> Result<(), AcquisitionError> {
        let mut contents = String::from("DATE,TAVG,TMAX,TMIN,PRCP,CITY\n");
        for i in 0..120 {
            contents.push_str(&format!("2023-{:02},1,4,-1,30,City{}\n", i % 12 + 1, i / 12));
        }
        contents.push_str("2024-01,1.5,4.5,-1.5,30.5,City0\n");
        let file = write_csv(&contents);

        let locations = load_historical_csv(file.path())?;

        assert_eq!(locations.len(), 10);
        let city = &locations[0];
        assert_eq!(city.location_name, "City0");
        assert_eq!(city.temperature.len(), 13);
        let last = &city.temperature[12];
        assert_eq!(last.average, Some(1.5));
        assert_eq!(last.max, Some(4.5));
        assert_eq!(last.min, Some(-1.5));
        assert_eq!(city.precipitation[12].rain, 30.5);
        assert_eq!(city.temperature[0].max, Some(4.0));
        Ok(())
    }

    #[test]
    fn nan_cells_are_treated_as_missing() -> Result<(), AcquisitionError> {
        let file = write_csv(
            "DATE,TAVG,TMAX,TMIN,PRCP,CITY\n\
             2024-01,1.0,10.0,0.0,5.0,A\n\
             2024-02,1.0,NaN,0.0,NaN,A\n\
             2024-03,1.0,20.0,0.0,7.0,A\n",
        );

        let locations = load_historical_csv(file.path())?;

        let a = &locations[0];
        assert_eq!(a.temperature[1].max, Some(15.0));
        assert_eq!(a.precipitation[1].rain, 0.0);
        assert_eq!(a.precipitation[2].rain, 7.0);
        Ok(())
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let file = write_csv("DATE,TAVG,CITY\n2024-01,1.0,Zurich\n");
        assert!(matches!(
            load_historical_csv(file.path()),
            Err(AcquisitionError::SchemaMismatch {
                expected: 6,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            load_historical_csv("/definitely/not/here.csv"),
            Err(AcquisitionError::CsvRead { .. })
        ));
    }
}
