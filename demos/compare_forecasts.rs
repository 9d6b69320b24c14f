//! demos/compare_forecasts.rs
//!
//! Fetches the 8-day forecast for three cities, aligns them on their shared
//! dates and opens the comparison charts in the browser.
//!
//! Needs `OPENWEATHER_API_KEY` in the environment or in a `.env` file.
//!
//! To run this example:
//! cargo run --example compare_forecasts --features charts

use std::error::Error;

use weather_compare::{
    build_tables, normalize, plot_avg_temperatures, plot_heatmap, plot_min_max_temperatures,
    plot_temperatures_by_time_of_day, plot_total_rain, plot_total_snow, plot_wind_speed,
    LocationQuery, Metric, TimeOfDay, WeatherClient, WeatherConfig,
};

fn main() -> Result<(), Box<dyn Error>> {
    // 1. Create a client from the environment
    let client = WeatherClient::new(WeatherConfig::from_env()?);

    // 2. Fetch every location, skipping the ones that fail
    let report = client.fetch_many([
        LocationQuery::new("Zurich").with_country_code("CH"),
        LocationQuery::new("Helsinki").with_country_code("FI"),
        LocationQuery::new("Singapore").with_country_code("SG"),
    ]);
    for (name, error) in &report.failures {
        eprintln!("Skipped {name}: {error}");
    }

    // 3. Merge and align the tables
    let set = normalize(build_tables(&report.locations)?)?;
    println!("Comparing {:?} over {:?}", set.locations(), set.dates()?);

    // 4. Plot
    for time_of_day in TimeOfDay::ALL {
        plot_temperatures_by_time_of_day(&set, time_of_day)?;
    }
    plot_min_max_temperatures(&set)?;
    plot_avg_temperatures(&set)?;
    plot_wind_speed(&set)?;
    plot_total_rain(&set)?;
    plot_total_snow(&set)?;
    plot_heatmap(&set, Metric::TempAvg)?;

    Ok(())
}
