use crate::acquisition::error::AcquisitionError;
use crate::config::ConfigError;
use crate::tables::error::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherCompareError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Table(#[from] TableError),
}
