pub mod city;
pub mod country;

pub use city::CityRecord;
pub use country::CountryMap;
