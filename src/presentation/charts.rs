//! Comparative charts rendered with plotlars. Each function opens the chart in
//! the browser.

use crate::presentation::frames::{
    heatmap_frame, range_frame, series_frame, totals_frame, Metric, TimeOfDay, LOCATION, TOTAL,
    VALUE,
};
use crate::tables::error::TableError;
use crate::tables::merged_table::columns::DATE;
use crate::tables::merged_table::NormalizedTableSet;
use log::{info, warn};
use plotlars::{BarPlot, HeatMap, Line, Plot, Rgb, Shape, Text, TimeSeriesPlot};

const FONT: &str = "Arial";

fn title(text: &str) -> Text {
    Text::from(text).font(FONT).size(18)
}

/// Line chart of `metric` with one series per location.
fn plot_series(
    set: &NormalizedTableSet,
    metric: Metric,
    chart_title: &str,
    with_shape: bool,
) -> Result<(), TableError> {
    if set.is_empty() {
        warn!("Nothing to plot for '{}'", chart_title);
        return Ok(());
    }
    let frame = series_frame(set, metric)?;
    let locations = set.locations();
    let (first, rest) = locations.split_at(1);

    info!("Plotting '{}' for {} locations", chart_title, locations.len());
    let plot = TimeSeriesPlot::builder()
        .data(&frame)
        .x(DATE)
        .y(first[0])
        .additional_series(rest.to_vec())
        .with_shape(with_shape)
        .shapes(locations.iter().map(|_| Shape::Circle).collect())
        .lines(
            locations
                .iter()
                .map(|_| if with_shape { Line::Solid } else { Line::Dot })
                .collect(),
        )
        .plot_title(title(chart_title))
        .x_title("Date")
        .y_title(metric.unit_label())
        .build();
    plot.plot();
    Ok(())
}

/// Temperatures at one time of day for every location.
pub fn plot_temperatures_by_time_of_day(
    set: &NormalizedTableSet,
    time_of_day: TimeOfDay,
) -> Result<(), TableError> {
    plot_series(
        set,
        time_of_day.metric(),
        &format!("Temperatures {time_of_day}"),
        true,
    )
}

/// Daily minimum and maximum temperature of every location.
pub fn plot_min_max_temperatures(set: &NormalizedTableSet) -> Result<(), TableError> {
    if set.is_empty() {
        return Ok(());
    }
    let frame = range_frame(set)?;
    let series: Vec<String> = set
        .iter()
        .flat_map(|t| [format!("{} min", t.location), format!("{} max", t.location)])
        .collect();
    let series: Vec<&str> = series.iter().map(String::as_str).collect();
    let (first, rest) = series.split_at(1);

    TimeSeriesPlot::builder()
        .data(&frame)
        .x(DATE)
        .y(first[0])
        .additional_series(rest.to_vec())
        .lines(
            (0..series.len())
                .map(|i| if i % 2 == 0 { Line::Dash } else { Line::Solid })
                .collect(),
        )
        .plot_title(title("Temperature Ranges"))
        .x_title("Date")
        .y_title(Metric::TempMin.unit_label())
        .build()
        .plot();
    Ok(())
}

pub fn plot_avg_temperatures(set: &NormalizedTableSet) -> Result<(), TableError> {
    plot_series(set, Metric::TempAvg, "Average Temperatures", true)
}

/// Wind speeds, skipped with a warning when the tables carry no wind data.
pub fn plot_wind_speed(set: &NormalizedTableSet) -> Result<(), TableError> {
    if !set.iter().all(|t| t.has_wind()) {
        warn!("Skipping wind speed chart, not every location has wind data");
        return Ok(());
    }
    plot_series(set, Metric::WindSpeed, "Wind Speeds", false)
}

fn plot_total(
    set: &NormalizedTableSet,
    metric: Metric,
    chart_title: &str,
    color: Rgb,
) -> Result<(), TableError> {
    let frame = totals_frame(set, metric)?;
    BarPlot::builder()
        .data(&frame)
        .labels(LOCATION)
        .values(TOTAL)
        .color(color)
        .plot_title(title(chart_title))
        .x_title("Location")
        .y_title(metric.unit_label())
        .build()
        .plot();
    Ok(())
}

pub fn plot_total_rain(set: &NormalizedTableSet) -> Result<(), TableError> {
    plot_total(set, Metric::Rain, "Total Rain", Rgb(135, 206, 235))
}

pub fn plot_total_snow(set: &NormalizedTableSet) -> Result<(), TableError> {
    plot_total(set, Metric::Snow, "Total Snow", Rgb(176, 196, 222))
}

/// Heatmap of `metric` with dates on the x axis and locations on the y axis.
pub fn plot_heatmap(set: &NormalizedTableSet, metric: Metric) -> Result<(), TableError> {
    let frame = heatmap_frame(set, metric)?;
    HeatMap::builder()
        .data(&frame)
        .x(DATE)
        .y(LOCATION)
        .z(VALUE)
        .plot_title(title(&format!("{} by Location", metric.unit_label())))
        .x_title("Date")
        .y_title("Location")
        .build()
        .plot();
    Ok(())
}
