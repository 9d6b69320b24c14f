mod acquisition;
mod config;
mod error;
mod presentation;
mod tables;
mod types;

pub use error::WeatherCompareError;

pub use config::*;

pub use acquisition::client::*;
pub use acquisition::csv_loader::load_historical_csv;
pub use acquisition::error::AcquisitionError;

pub use tables::builder::{build_table, build_tables};
pub use tables::error::TableError;
pub use tables::merged_table::{columns, MergedTable, NormalizedTableSet};
pub use tables::normalizer::normalize;

pub use presentation::frames::*;
#[cfg(feature = "charts")]
pub use presentation::charts::*;

pub use types::day::{DayId, DayIdKind, DayRecord, DATE_FORMAT};
pub use types::location::*;
pub use types::records::*;
