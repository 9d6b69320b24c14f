//! Client configuration: the API credential and the endpoints it is sent to.

use bon::Builder;
use std::fmt;
use thiserror::Error;

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_GEOCODING_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
pub const DEFAULT_GEOCODING_LIMIT: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found, set OPENWEATHER_API_KEY in the environment or in a .env file")]
    MissingApiKey,
}

/// Settings for [`crate::WeatherClient`].
///
/// The credential is fixed once the config is built. Endpoint URLs default to the
/// public OpenWeatherMap services and are only overridden to point at a proxy or
/// a mock server.
///
/// # Examples
///
/// ```
/// use weather_compare::WeatherConfig;
///
/// let config = WeatherConfig::builder()
///     .api_key("my-key")
///     .geocoding_limit(3)
///     .build();
/// assert_eq!(config.geocoding_limit(), 3);
/// assert_eq!(config.forecast_url(), weather_compare::DEFAULT_FORECAST_URL);
/// ```
#[derive(Clone, Builder)]
pub struct WeatherConfig {
    #[builder(into)]
    api_key: String,
    #[builder(into, default = DEFAULT_GEOCODING_URL.to_string())]
    geocoding_url: String,
    #[builder(into, default = DEFAULT_FORECAST_URL.to_string())]
    forecast_url: String,
    /// Maximum number of candidates requested from the geocoder.
    #[builder(default = DEFAULT_GEOCODING_LIMIT)]
    geocoding_limit: u32,
}

impl WeatherConfig {
    /// Reads the API key from [`API_KEY_VAR`], loading a `.env` file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_api_key(std::env::var(API_KEY_VAR).ok())
    }

    pub(crate) fn from_api_key(api_key: Option<String>) -> Result<Self, ConfigError> {
        match api_key {
            Some(key) if !key.trim().is_empty() => {
                Ok(Self::builder().api_key(key.trim()).build())
            }
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn geocoding_url(&self) -> &str {
        &self.geocoding_url
    }

    pub fn forecast_url(&self) -> &str {
        &self.forecast_url
    }

    pub fn geocoding_limit(&self) -> u32 {
        self.geocoding_limit
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("geocoding_url", &self.geocoding_url)
            .field("forecast_url", &self.forecast_url)
            .field("geocoding_limit", &self.geocoding_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(matches!(
            WeatherConfig::from_api_key(None),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            WeatherConfig::from_api_key(Some("   ".to_string())),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn key_is_trimmed_and_defaults_applied() -> Result<(), ConfigError> {
        let config = WeatherConfig::from_api_key(Some(" abc123\n".to_string()))?;
        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.geocoding_url(), DEFAULT_GEOCODING_URL);
        assert_eq!(config.forecast_url(), DEFAULT_FORECAST_URL);
        assert_eq!(config.geocoding_limit(), DEFAULT_GEOCODING_LIMIT);
        Ok(())
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = WeatherConfig::builder().api_key("secret-value").build();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}
