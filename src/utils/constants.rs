/// Default file names, as distributed by GeoNames
pub const DEFAULT_CITIES_FILE: &str = "cities1000.txt";
pub const DEFAULT_COUNTRY_FILE: &str = "countryInfo.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "cities.json";

/// Population threshold below which a city is excluded
pub const DEFAULT_MIN_POPULATION: u64 = 5000;

/// Country used when an ISO code has no entry in the country table
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Country table layout (countryInfo.txt)
pub const COUNTRY_COMMENT_PREFIX: char = '#';
pub const COUNTRY_ISO_COLUMN: usize = 0;
pub const COUNTRY_NAME_COLUMN: usize = 4;
pub const COUNTRY_MIN_COLUMNS: usize = 5;

/// Gazetteer layout (cities1000.txt)
pub const CITY_NAME_COLUMN: usize = 1;
pub const CITY_LATITUDE_COLUMN: usize = 4;
pub const CITY_LONGITUDE_COLUMN: usize = 5;
pub const CITY_COUNTRY_CODE_COLUMN: usize = 8;
pub const CITY_POPULATION_COLUMN: usize = 14;
pub const CITY_MIN_COLUMNS: usize = 15;

pub const FIELD_DELIMITER: u8 = b'\t';
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "GAZETTEER";

/// How often the progress spinner is updated, in rows
pub const PROGRESS_UPDATE_INTERVAL: u64 = 10_000;
