//! Day identity shared by every record kind.
//!
//! A record is tied to exactly one calendar day. Forecast data carries an epoch
//! timestamp plus the location's UTC offset, historical CSV data carries the
//! calendar date directly.

use chrono::{DateTime, NaiveDate};
use std::fmt;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Format of the human-readable `date` column in merged tables.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Identifies the calendar day a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayId {
    /// Epoch seconds (UTC) plus the location's offset from UTC in seconds.
    Timestamp { timestamp: i64, timezone_offset: i32 },
    /// A calendar date supplied by the source. Monthly rows use the first of the month.
    Date(NaiveDate),
}

/// Which of the two [`DayId`] variants a record uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayIdKind {
    Timestamp,
    Date,
}

impl fmt::Display for DayIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayIdKind::Timestamp => write!(f, "timestamp"),
            DayIdKind::Date => write!(f, "date"),
        }
    }
}

impl DayId {
    pub fn from_timestamp(timestamp: i64, timezone_offset: i32) -> Self {
        DayId::Timestamp {
            timestamp,
            timezone_offset,
        }
    }

    pub fn kind(&self) -> DayIdKind {
        match self {
            DayId::Timestamp { .. } => DayIdKind::Timestamp,
            DayId::Date(_) => DayIdKind::Date,
        }
    }

    /// Resolves the calendar day as `floor_to_day(timestamp + timezone_offset)`.
    ///
    /// Returns `None` only for timestamps outside chrono's representable range.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            DayId::Timestamp {
                timestamp,
                timezone_offset,
            } => {
                let local = timestamp + i64::from(*timezone_offset);
                let day_start = local.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;
                DateTime::from_timestamp(day_start, 0).map(|dt| dt.date_naive())
            }
            DayId::Date(date) => Some(*date),
        }
    }

    /// The `DD.MM.YYYY` label used in the `date` column.
    pub fn label(&self) -> Option<String> {
        self.calendar_date()
            .map(|date| date.format(DATE_FORMAT).to_string())
    }
}

/// Accessor implemented by every record kind so the table builder can flatten
/// them generically.
pub trait DayRecord {
    fn day(&self) -> &DayId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_shifted_by_offset_before_flooring() {
        // 2024-06-01 23:30:00 UTC, two hours ahead locally -> 2 June
        let day = DayId::from_timestamp(1_717_284_600, 7_200);
        assert_eq!(day.label().as_deref(), Some("02.06.2024"));

        let utc = DayId::from_timestamp(1_717_284_600, 0);
        assert_eq!(utc.label().as_deref(), Some("01.06.2024"));
    }

    #[test]
    fn negative_offset_can_move_to_previous_day() {
        // 2024-06-02 01:00:00 UTC, five hours behind -> 1 June
        let day = DayId::from_timestamp(1_717_290_000, -18_000);
        assert_eq!(
            day.calendar_date(),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
    }

    #[test]
    fn date_variant_formats_directly() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let day = DayId::Date(date);
        assert_eq!(day.kind(), DayIdKind::Date);
        assert_eq!(day.label().as_deref(), Some("01.03.2024"));
    }
}
