use crate::tables::error::TableError;
use crate::tables::merged_table::{columns, MergedTable, NormalizedTableSet};
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashSet;

/// Reduces every table to the dates present in all of them.
///
/// Row order inside each table is kept, so tables built by
/// [`build_table`](crate::build_table) end up with identical date columns.
/// When the tables share no date, each comes back with zero rows.
///
/// # Errors
///
/// * [`TableError::NoTables`] if `tables` is empty.
/// * [`TableError::DataFrameProcessing`] if a table has no string `date` column.
pub fn normalize(tables: Vec<MergedTable>) -> Result<NormalizedTableSet, TableError> {
    if tables.is_empty() {
        return Err(TableError::NoTables);
    }

    let mut common: Option<HashSet<String>> = None;
    for table in &tables {
        let dates: HashSet<String> = table.dates()?.into_iter().collect();
        common = Some(match common {
            Some(shared) => shared.intersection(&dates).cloned().collect(),
            None => dates,
        });
    }
    let common = common.unwrap_or_default();
    info!(
        "Normalizing {} tables to {} common dates",
        tables.len(),
        common.len()
    );

    let normalized = tables
        .into_iter()
        .map(|table| keep_dates(table, &common))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NormalizedTableSet::new(normalized))
}

fn keep_dates(table: MergedTable, keep: &HashSet<String>) -> Result<MergedTable, TableError> {
    let mask: BooleanChunked = table
        .frame
        .column(columns::DATE)?
        .str()?
        .into_iter()
        .map(|date| date.is_some_and(|d| keep.contains(d)))
        .collect();

    let frame = table.frame.filter(&mask)?;
    let removed = table.frame.height() - frame.height();
    if removed > 0 {
        debug!(
            "Removed {} rows from '{}' with dates not shared by every location",
            removed, table.location
        );
    }
    Ok(MergedTable::new(table.location, frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builder::build_table;
    use crate::tables::merged_table::columns::{DATE, TEMP_AVG};
    use crate::types::day::DayId;
    use crate::types::location::LocationWeatherData;
    use crate::types::records::{PrecipitationRecord, TemperatureRecord, WindRecord};

    fn table(location: &str, dates: &[&str]) -> MergedTable {
        let averages: Vec<f64> = (0..dates.len()).map(|i| i as f64).collect();
        let frame = DataFrame::new(vec![
            Column::new(DATE.into(), dates.to_vec()),
            Column::new(TEMP_AVG.into(), averages),
        ])
        .unwrap();
        MergedTable::new(location, frame)
    }

    #[test]
    fn keeps_only_shared_dates() -> Result<(), TableError> {
        let set = normalize(vec![
            table("Zurich", &["01.06.2024", "02.06.2024", "03.06.2024"]),
            table("Singapore", &["02.06.2024", "03.06.2024", "04.06.2024"]),
        ])?;

        assert_eq!(set.len(), 2);
        for table in &set {
            assert_eq!(table.dates()?, ["02.06.2024", "03.06.2024"]);
        }
        assert_eq!(set.get("Zurich").unwrap().values(TEMP_AVG)?, [Some(1.0), Some(2.0)]);
        assert_eq!(
            set.get("Singapore").unwrap().values(TEMP_AVG)?,
            [Some(0.0), Some(1.0)]
        );
        Ok(())
    }

    #[test]
    fn keeps_row_order_and_location_order() -> Result<(), TableError> {
        let set = normalize(vec![
            table("B", &["03.06.2024", "01.06.2024", "02.06.2024"]),
            table("A", &["01.06.2024", "03.06.2024"]),
        ])?;
        assert_eq!(set.locations(), ["B", "A"]);
        assert_eq!(set.get("B").unwrap().dates()?, ["03.06.2024", "01.06.2024"]);
        assert_eq!(set.dates()?, ["03.06.2024", "01.06.2024"]);
        Ok(())
    }

    #[test]
    fn disjoint_dates_give_empty_tables() -> Result<(), TableError> {
        let set = normalize(vec![
            table("Zurich", &["01.06.2024"]),
            table("Singapore", &["02.06.2024"]),
        ])?;
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(MergedTable::is_empty));
        Ok(())
    }

    #[test]
    fn single_built_table_is_unchanged() -> Result<(), TableError> {
        let day = |i: i64| DayId::from_timestamp(1_717_236_000 + i * 86_400, 7_200);
        let data = LocationWeatherData {
            location_name: "Zurich".to_string(),
            coordinates: None,
            temperature: (0..3)
                .map(|i| TemperatureRecord {
                    day: day(i),
                    morning: Some(10.0 + i as f64),
                    day_temp: Some(18.0),
                    evening: Some(15.0),
                    night: None,
                    min: Some(8.0),
                    max: Some(19.0),
                    average: None,
                })
                .collect(),
            precipitation: (0..3)
                .map(|i| PrecipitationRecord {
                    day: day(i),
                    rain: 1.0,
                    snow: 0.0,
                    probability: 0.3,
                })
                .collect(),
            wind: (0..3)
                .map(|i| WindRecord {
                    day: day(i),
                    speed: 4.0,
                    degrees: 90.0,
                })
                .collect(),
        };
        let built = build_table(&data)?;

        let set = normalize(vec![built.clone()])?;

        assert_eq!(set.len(), 1);
        let normalized = &set.tables()[0];
        assert_eq!(normalized.location, built.location);
        assert_eq!(normalized.height(), 3);
        assert!(normalized.frame.equals_missing(&built.frame));
        Ok(())
    }

    #[test]
    fn no_tables_is_an_error() {
        assert!(matches!(normalize(Vec::new()), Err(TableError::NoTables)));
    }
}
