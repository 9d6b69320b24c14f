//! Blocking client for the OpenWeatherMap geocoding and One Call forecast APIs.

use crate::acquisition::error::AcquisitionError;
use crate::acquisition::responses::{DailyForecast, ForecastResponse, GeocodingMatch};
use crate::config::WeatherConfig;
use crate::types::day::DayId;
use crate::types::location::{Coordinates, LatLon, LocationWeatherData};
use crate::types::records::{PrecipitationRecord, TemperatureRecord, WindRecord};
use bon::bon;
use log::{error, info, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

const FORECAST_EXCLUDE: &str = "current,minutely,hourly,alerts";
const FORECAST_UNITS: &str = "metric";

/// A location to look up with [`WeatherClient::fetch_many`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub name: String,
    pub state_code: Option<String>,
    pub country_code: Option<String>,
}

impl LocationQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state_code: None,
            country_code: None,
        }
    }

    pub fn with_state_code(mut self, state_code: impl Into<String>) -> Self {
        self.state_code = Some(state_code.into());
        self
    }

    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }
}

impl From<&str> for LocationQuery {
    fn from(name: &str) -> Self {
        LocationQuery::new(name)
    }
}

/// Outcome of [`WeatherClient::fetch_many`]: every location either succeeded or
/// failed on its own.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Successfully fetched locations, in request order.
    pub locations: Vec<LocationWeatherData>,
    /// Locations that could not be fetched, with the reason.
    pub failures: Vec<(String, AcquisitionError)>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The acquisition client.
///
/// Every call issues exactly one HTTP request (or one per location for the
/// combined helpers) and blocks until it completes. There are no retries.
///
/// # Examples
///
/// ```no_run
/// use weather_compare::{LatLon, WeatherClient, WeatherConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WeatherClient::new(WeatherConfig::from_env()?);
///
/// let coordinates = client
///     .resolve_location()
///     .name("Zurich")
///     .country_code("CH")
///     .call()?;
///
/// if let Some(lat_lon) = coordinates.first() {
///     let data = client.fetch_forecast("Zurich", lat_lon)?;
///     println!("{} forecast days", data.temperature.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherClient {
    config: WeatherConfig,
    http: Client,
}

#[bon]
impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Resolves a place name to coordinates through the geocoding endpoint.
    ///
    /// The query is the name followed by the optional state and country codes,
    /// comma separated in that order.
    ///
    /// # Errors
    ///
    /// * [`AcquisitionError::LocationNotFound`] if the geocoder returns no match.
    /// * [`AcquisitionError::NetworkRequest`], [`AcquisitionError::HttpStatus`],
    ///   [`AcquisitionError::ResponseBody`] or [`AcquisitionError::JsonParse`] when the
    ///   request itself fails.
    #[builder]
    pub fn resolve_location(
        &self,
        name: &str,
        state_code: Option<&str>,
        country_code: Option<&str>,
    ) -> Result<Coordinates, AcquisitionError> {
        let query = geocoding_query(name, state_code, country_code);
        let params = [
            ("q", query.clone()),
            ("limit", self.config.geocoding_limit().to_string()),
            ("appid", self.config.api_key().to_string()),
        ];

        let result = self
            .get_json::<Option<Vec<GeocodingMatch>>>(self.config.geocoding_url(), &params)
            .and_then(|matches| {
                let mut coordinates: Vec<LatLon> = matches
                    .unwrap_or_default()
                    .into_iter()
                    .map(|m| LatLon(m.lat, m.lon))
                    .collect();
                match coordinates.len() {
                    0 => Err(AcquisitionError::LocationNotFound(query.clone())),
                    1 => Ok(Coordinates::Single(coordinates.remove(0))),
                    _ => Ok(Coordinates::Multiple(coordinates)),
                }
            });

        result.inspect_err(|e| error!("Geocoding '{}' failed: {}", query, e))
    }

    /// Fetches the 8-day daily forecast for a coordinate pair.
    ///
    /// Each daily entry yields one temperature, precipitation and wind record,
    /// keyed by the entry's own timestamp and the response's timezone offset.
    ///
    /// # Errors
    ///
    /// * [`AcquisitionError::EmptyForecast`] if the response is `null` or has no daily entries.
    /// * Transport, status and parsing errors as for [`WeatherClient::resolve_location`].
    pub fn fetch_forecast(
        &self,
        location_name: &str,
        location: LatLon,
    ) -> Result<LocationWeatherData, AcquisitionError> {
        let params = [
            ("lat", location.0.to_string()),
            ("lon", location.1.to_string()),
            ("appid", self.config.api_key().to_string()),
            ("exclude", FORECAST_EXCLUDE.to_string()),
            ("units", FORECAST_UNITS.to_string()),
        ];

        let result = self
            .get_json::<Option<ForecastResponse>>(self.config.forecast_url(), &params)
            .and_then(|response| {
                let response = response.unwrap_or_default();
                match response.daily {
                    Some(daily) if !daily.is_empty() => Ok(forecast_to_location_data(
                        location_name,
                        location,
                        response.timezone_offset,
                        daily,
                    )),
                    _ => Err(AcquisitionError::EmptyForecast(location_name.to_string())),
                }
            });

        result.inspect_err(|e| error!("Forecast for '{}' failed: {}", location_name, e))
    }

    /// Resolves a place name and fetches its forecast.
    ///
    /// When the name is ambiguous the first candidate is used and a warning is logged.
    #[builder]
    pub fn fetch_location_forecast(
        &self,
        name: &str,
        state_code: Option<&str>,
        country_code: Option<&str>,
    ) -> Result<LocationWeatherData, AcquisitionError> {
        let coordinates = self
            .resolve_location()
            .name(name)
            .maybe_state_code(state_code)
            .maybe_country_code(country_code)
            .call()?;

        if let Coordinates::Multiple(candidates) = &coordinates {
            warn!(
                "'{}' matched {} locations, using the first one",
                name,
                candidates.len()
            );
        }
        let lat_lon = coordinates
            .first()
            .ok_or_else(|| AcquisitionError::LocationNotFound(name.to_string()))?;

        self.fetch_forecast(name, lat_lon)
    }

    /// Fetches forecasts for several locations, one after the other.
    ///
    /// A failing location is recorded in [`FetchReport::failures`] and does not
    /// stop the remaining ones.
    pub fn fetch_many<Q>(&self, queries: impl IntoIterator<Item = Q>) -> FetchReport
    where
        Q: Into<LocationQuery>,
    {
        let mut report = FetchReport::default();
        for query in queries.into_iter().map(Into::into) {
            let result = self
                .fetch_location_forecast()
                .name(&query.name)
                .maybe_state_code(query.state_code.as_deref())
                .maybe_country_code(query.country_code.as_deref())
                .call();
            match result {
                Ok(data) => report.locations.push(data),
                Err(e) => {
                    warn!("Skipping '{}': {}", query.name, e);
                    report.failures.push((query.name, e));
                }
            }
        }
        info!(
            "Fetched {} locations, {} failed",
            report.locations.len(),
            report.failures.len()
        );
        report
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, AcquisitionError> {
        // `url` is logged and stored without the query string so the API key stays out of logs.
        info!("Requesting {}", url);
        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .map_err(|e| AcquisitionError::NetworkRequest(url.to_string(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let e = e.without_url();
                warn!("HTTP error for {}: {:?}", url, e.status());
                return Err(if let Some(status) = e.status() {
                    AcquisitionError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    AcquisitionError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .text()
            .map_err(|e| AcquisitionError::ResponseBody(url.to_string(), e.without_url()))?;
        serde_json::from_str(&body).map_err(|source| AcquisitionError::JsonParse {
            url: url.to_string(),
            source,
        })
    }
}

fn geocoding_query(name: &str, state_code: Option<&str>, country_code: Option<&str>) -> String {
    let mut query = name.to_string();
    for part in [state_code, country_code].into_iter().flatten() {
        query.push(',');
        query.push_str(part);
    }
    query
}

fn forecast_to_location_data(
    location_name: &str,
    location: LatLon,
    timezone_offset: i32,
    daily: Vec<DailyForecast>,
) -> LocationWeatherData {
    let mut temperature = Vec::with_capacity(daily.len());
    let mut precipitation = Vec::with_capacity(daily.len());
    let mut wind = Vec::with_capacity(daily.len());

    for entry in daily {
        let day = DayId::from_timestamp(entry.dt, timezone_offset);
        temperature.push(TemperatureRecord {
            day,
            morning: entry.temp.morn,
            day_temp: entry.temp.day,
            evening: entry.temp.eve,
            night: entry.temp.night,
            min: entry.temp.min,
            max: entry.temp.max,
            average: None,
        });
        precipitation.push(PrecipitationRecord {
            day,
            rain: entry.rain,
            snow: entry.snow,
            probability: entry.pop,
        });
        wind.push(WindRecord {
            day,
            speed: entry.wind_speed,
            degrees: entry.wind_deg,
        });
    }

    LocationWeatherData {
        location_name: location_name.to_string(),
        coordinates: Some(location),
        temperature,
        precipitation,
        wind,
    }
}
