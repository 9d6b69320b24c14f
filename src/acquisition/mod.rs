pub mod client;
pub mod csv_loader;
pub mod error;
mod responses;
