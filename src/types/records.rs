use crate::types::day::{DayId, DayRecord};

/// Temperatures for one day (or one month for historical data), in °C.
///
/// Forecast data fills the four time-of-day readings and leaves `average` empty;
/// historical data has no time-of-day readings but supplies `average` directly.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureRecord {
    pub day: DayId,
    pub morning: Option<f64>,
    pub day_temp: Option<f64>,
    pub evening: Option<f64>,
    pub night: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
}

impl TemperatureRecord {
    /// The supplied average, or the mean of whichever time-of-day readings are present.
    pub fn resolved_average(&self) -> Option<f64> {
        if self.average.is_some() {
            return self.average;
        }
        let present: Vec<f64> = [self.morning, self.day_temp, self.evening, self.night]
            .into_iter()
            .flatten()
            .collect();
        if present.is_empty() {
            None
        } else {
            Some(present.iter().sum::<f64>() / present.len() as f64)
        }
    }
}

/// Precipitation for one day. Amounts in mm, probability in `0.0..=1.0`.
/// Sources that omit a value mean "none", so every field defaults to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationRecord {
    pub day: DayId,
    pub rain: f64,
    pub snow: f64,
    pub probability: f64,
}

/// Wind for one day. Only forecast data has wind.
#[derive(Debug, Clone, PartialEq)]
pub struct WindRecord {
    pub day: DayId,
    pub speed: f64,
    pub degrees: f64,
}

impl DayRecord for TemperatureRecord {
    fn day(&self) -> &DayId {
        &self.day
    }
}

impl DayRecord for PrecipitationRecord {
    fn day(&self) -> &DayId {
        &self.day
    }
}

impl DayRecord for WindRecord {
    fn day(&self) -> &DayId {
        &self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temperature(values: [Option<f64>; 4], average: Option<f64>) -> TemperatureRecord {
        TemperatureRecord {
            day: DayId::from_timestamp(0, 0),
            morning: values[0],
            day_temp: values[1],
            evening: values[2],
            night: values[3],
            min: None,
            max: None,
            average,
        }
    }

    #[test]
    fn average_of_all_time_of_day_values() {
        let record = temperature([Some(10.0), Some(20.0), Some(16.0), Some(6.0)], None);
        assert_eq!(record.resolved_average(), Some(13.0));
    }

    #[test]
    fn average_skips_missing_readings() {
        let record = temperature([Some(10.0), None, Some(20.0), None], None);
        assert_eq!(record.resolved_average(), Some(15.0));
    }

    #[test]
    fn supplied_average_wins() {
        let record = temperature([None; 4], Some(4.5));
        assert_eq!(record.resolved_average(), Some(4.5));
        assert_eq!(temperature([None; 4], None).resolved_average(), None);
    }
}
