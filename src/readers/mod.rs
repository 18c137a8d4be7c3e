pub mod city_reader;
pub mod country_reader;

pub use city_reader::{CityReader, RowOutcome};
pub use country_reader::CountryReader;
