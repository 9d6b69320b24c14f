pub mod builder;
pub mod error;
pub mod merged_table;
pub mod normalizer;
