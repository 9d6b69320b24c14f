#[cfg(feature = "charts")]
pub mod charts;
pub mod frames;
