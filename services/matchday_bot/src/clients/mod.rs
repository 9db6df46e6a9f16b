pub mod football_data;
pub mod twitter;
