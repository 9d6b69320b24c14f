//! demos/historical_csv.rs
//!
//! Loads monthly historical records from a CSV file, merges them per location
//! and prints the values every location has in common.
//!
//! To run this example:
//! cargo run --example historical_csv -- path/to/weather.csv

use std::error::Error;

use weather_compare::{
    build_tables, columns, load_historical_csv, normalize, series_frame, totals_frame, Metric,
};

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: historical_csv <path to csv>")?;

    // 1. Load and impute the CSV rows, one entry per location
    let locations = load_historical_csv(&path)?;
    println!("Loaded {} locations from {}", locations.len(), path);

    // 2. Merge each location into a table and keep the months all locations share
    let set = normalize(build_tables(&locations)?)?;
    println!("Common months: {:?}", set.dates()?);

    // 3. Print the comparison frames
    println!("{}", series_frame(&set, Metric::TempAvg)?);
    println!("{}", totals_frame(&set, Metric::Rain)?);

    for table in &set {
        let max = table.values(columns::TEMP_MAX)?;
        let warmest = max.iter().flatten().cloned().fold(f64::NEG_INFINITY, f64::max);
        println!("{}: warmest monthly maximum {:.1} °C", table.location, warmest);
    }

    Ok(())
}
