pub mod day;
pub mod location;
pub mod records;
