use crate::error::Result;
use crate::models::CountryMap;
use crate::utils::constants::{
    COUNTRY_COMMENT_PREFIX, COUNTRY_ISO_COLUMN, COUNTRY_MIN_COLUMNS, COUNTRY_NAME_COLUMN,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct CountryReader;

impl CountryReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the country table (countryInfo.txt) into a code-to-name map
    pub fn read_countries(&self, path: &Path) -> Result<CountryMap> {
        let file = File::open(path)?;
        let countries = self.read_countries_from(file)?;

        info!(
            countries = countries.len(),
            path = %path.display(),
            "Loaded country table"
        );
        if countries.is_empty() {
            warn!(path = %path.display(), "Country table is empty, every city will resolve to Unknown");
        }

        Ok(countries)
    }

    pub fn read_countries_from<R: Read>(&self, source: R) -> Result<CountryMap> {
        let reader = BufReader::new(source);
        let mut countries = CountryMap::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;

            if line.starts_with(COUNTRY_COMMENT_PREFIX) {
                continue;
            }

            match self.parse_country_line(&line) {
                Some((code, name)) => countries.insert(code, name),
                None => debug!(line = index + 1, "Skipping short country line"),
            }
        }

        Ok(countries)
    }

    /// Parse a single line from the country table
    fn parse_country_line<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        // ISO, ISO3, ISO-Numeric, fips, Country, Capital, ...
        let parts: Vec<&str> = line.trim().split('\t').collect();

        if parts.len() < COUNTRY_MIN_COLUMNS {
            return None;
        }

        Some((parts[COUNTRY_ISO_COLUMN], parts[COUNTRY_NAME_COLUMN]))
    }
}

impl Default for CountryReader {
    fn default() -> Self {
        Self::new()
    }
}
