//! Wire types of the geocoding and One Call forecast endpoints.
//!
//! Only the fields the client reads are declared; serde ignores the rest.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingMatch {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub timezone_offset: i32,
    #[serde(default)]
    pub daily: Option<Vec<DailyForecast>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyForecast {
    pub dt: i64,
    #[serde(default)]
    pub temp: DailyTemperature,
    // Absent precipitation and wind mean "none".
    #[serde(default)]
    pub rain: f64,
    #[serde(default)]
    pub snow: f64,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: f64,
}

/// Missing temperatures stay missing; they are never defaulted to zero.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DailyTemperature {
    pub morn: Option<f64>,
    pub day: Option<f64>,
    pub eve: Option<f64>,
    pub night: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_get_defaults() -> Result<(), serde_json::Error> {
        let body = r#"{
            "timezone_offset": 3600,
            "daily": [
                { "dt": 1717236000, "temp": { "morn": 12.5, "max": 22.0 } }
            ]
        }"#;
        let response: ForecastResponse = serde_json::from_str(body)?;
        let daily = response.daily.unwrap_or_default();
        assert_eq!(response.timezone_offset, 3600);
        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.temp.morn, Some(12.5));
        assert_eq!(day.temp.day, None);
        assert_eq!(day.temp.max, Some(22.0));
        assert_eq!(day.rain, 0.0);
        assert_eq!(day.pop, 0.0);
        assert_eq!(day.wind_deg, 0.0);
        Ok(())
    }

    #[test]
    fn integer_wind_direction_is_accepted() -> Result<(), serde_json::Error> {
        let body = r#"{ "dt": 1, "wind_speed": 3.2, "wind_deg": 270 }"#;
        let day: DailyForecast = serde_json::from_str(body)?;
        assert_eq!(day.wind_deg, 270.0);
        assert_eq!(day.temp.min, None);
        Ok(())
    }
}
