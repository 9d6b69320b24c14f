//! Location-level containers: coordinates, geocoding results and the per-location
//! record lists that feed the table builder.

use crate::types::records::{PrecipitationRecord, TemperatureRecord, WindRecord};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_compare::LatLon;
///
/// let zurich = LatLon(47.3769, 8.5417);
/// assert_eq!(zurich.0, 47.3769); // Latitude
/// assert_eq!(zurich.1, 8.5417); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Result of a geocoding lookup.
///
/// A single match is the common case; ambiguity is only surfaced when the
/// geocoder returns more than one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    Single(LatLon),
    Multiple(Vec<LatLon>),
}

impl Coordinates {
    /// The single match, or the first (best ranked) candidate of an ambiguous lookup.
    pub fn first(&self) -> Option<LatLon> {
        match self {
            Coordinates::Single(lat_lon) => Some(*lat_lon),
            Coordinates::Multiple(candidates) => candidates.first().copied(),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Coordinates::Multiple(_))
    }
}

/// All records loaded for one location.
///
/// The three lists are parallel: they are joined on day identity when a
/// [`crate::MergedTable`] is built, and days missing from any list are dropped.
/// `wind` is empty for historical CSV data.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationWeatherData {
    pub location_name: String,
    pub coordinates: Option<LatLon>,
    pub temperature: Vec<TemperatureRecord>,
    pub precipitation: Vec<PrecipitationRecord>,
    pub wind: Vec<WindRecord>,
}

impl LocationWeatherData {
    pub fn has_wind(&self) -> bool {
        !self.wind.is_empty()
    }
}
