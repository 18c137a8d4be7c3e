use crate::archive::ArchiveInspector;
use crate::config::PopulationPolicy;
use crate::error::{ConversionError, Result};
use crate::models::{CityRecord, CountryMap};
use crate::processors::{ExtractionReport, SkipReason};
use crate::utils::constants::{
    CITY_COUNTRY_CODE_COLUMN, CITY_LATITUDE_COLUMN, CITY_LONGITUDE_COLUMN, CITY_MIN_COLUMNS,
    CITY_NAME_COLUMN, CITY_POPULATION_COLUMN, DEFAULT_BUFFER_SIZE, DEFAULT_MIN_POPULATION,
    FIELD_DELIMITER, PROGRESS_UPDATE_INTERVAL,
};
use crate::utils::progress::ProgressReporter;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;
use zip::ZipArchive;

/// Result of examining one gazetteer row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(CityRecord),
    Skipped(SkipReason),
}

pub struct CityReader {
    min_population: u64,
    policy: PopulationPolicy,
}

impl CityReader {
    pub fn new() -> Self {
        Self {
            min_population: DEFAULT_MIN_POPULATION,
            policy: PopulationPolicy::default(),
        }
    }

    pub fn with_min_population(mut self, min_population: u64) -> Self {
        self.min_population = min_population;
        self
    }

    pub fn with_policy(mut self, policy: PopulationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read cities from a gazetteer file, or from the gazetteer entry of a `.zip` archive
    pub fn read_cities(
        &self,
        path: &Path,
        countries: &CountryMap,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<CityRecord>, ExtractionReport)> {
        let file = File::open(path)?;

        let (cities, report) = if ArchiveInspector::is_zip(path) {
            let mut archive = ZipArchive::new(BufReader::new(file))?;
            let entry_name = ArchiveInspector::find_gazetteer_entry(&archive, path)?;
            info!(archive = %path.display(), entry = %entry_name, "Reading gazetteer from archive");

            let entry = archive.by_name(&entry_name)?;
            self.read_cities_from(entry, countries, progress)?
        } else {
            self.read_cities_from(file, countries, progress)?
        };

        info!(
            accepted = report.accepted,
            rows = report.rows_read,
            path = %path.display(),
            "Extracted cities"
        );

        Ok((cities, report))
    }

    /// Stream tab-separated gazetteer rows from any reader, keeping source order
    pub fn read_cities_from<R: Read>(
        &self,
        source: R,
        countries: &CountryMap,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<CityRecord>, ExtractionReport)> {
        let mut reader = ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .from_reader(source);

        let mut row = StringRecord::new();
        let mut cities = Vec::new();
        let mut report = ExtractionReport::new();

        while reader.read_record(&mut row)? {
            report.rows_read += 1;
            let line = row
                .position()
                .map(|pos| pos.line())
                .unwrap_or(report.rows_read);

            match self.parse_city_row(&row, line, countries)? {
                RowOutcome::Accepted(city) => {
                    report.record_accepted(city.has_known_country());
                    cities.push(city);
                }
                RowOutcome::Skipped(reason) => {
                    debug!(line, ?reason, "Skipping gazetteer row");
                    report.record_skip(reason);
                }
            }

            if report.rows_read % PROGRESS_UPDATE_INTERVAL == 0 {
                if let Some(progress) = progress {
                    progress.update(report.rows_read);
                }
            }
        }

        if let Some(progress) = progress {
            progress.update(report.rows_read);
        }

        Ok((cities, report))
    }

    /// Decide the fate of one gazetteer row.
    ///
    /// Only the strict policy returns an error, for a population column that is
    /// missing or not an integer.
    pub fn parse_city_row(
        &self,
        row: &StringRecord,
        line: u64,
        countries: &CountryMap,
    ) -> Result<RowOutcome> {
        match self.policy {
            PopulationPolicy::Strict => {
                let raw = row
                    .get(CITY_POPULATION_COLUMN)
                    .ok_or(ConversionError::MissingColumn {
                        line,
                        index: CITY_POPULATION_COLUMN,
                    })?;
                let population =
                    parse_integer(raw).ok_or_else(|| ConversionError::InvalidPopulation {
                        line,
                        value: raw.to_string(),
                    })?;

                if self.is_below_threshold(population) {
                    return Ok(RowOutcome::Skipped(SkipReason::BelowThreshold));
                }
                if row.len() < CITY_MIN_COLUMNS {
                    return Ok(RowOutcome::Skipped(SkipReason::ShortRow));
                }
            }
            PopulationPolicy::Lenient => {
                if row.len() < CITY_MIN_COLUMNS {
                    return Ok(RowOutcome::Skipped(SkipReason::ShortRow));
                }

                let raw = &row[CITY_POPULATION_COLUMN];
                let population = if raw.is_empty() {
                    0
                } else {
                    match parse_integer(raw) {
                        Some(population) => population,
                        None => return Ok(RowOutcome::Skipped(SkipReason::Malformed)),
                    }
                };

                if self.is_below_threshold(population) {
                    return Ok(RowOutcome::Skipped(SkipReason::BelowThreshold));
                }
            }
        }

        Ok(self.extract_city(row, countries))
    }

    fn extract_city(&self, row: &StringRecord, countries: &CountryMap) -> RowOutcome {
        let Some((name, lat, lng, population, iso_code)) = extract_fields(row) else {
            return RowOutcome::Skipped(SkipReason::Malformed);
        };

        debug!(iso_code, population, "City row");

        let city = CityRecord::new(
            name.to_string(),
            lat,
            lng,
            population,
            countries.resolve(iso_code).to_string(),
        );
        if city.validate().is_err() {
            return RowOutcome::Skipped(SkipReason::Malformed);
        }

        RowOutcome::Accepted(city)
    }

    fn is_below_threshold(&self, population: i64) -> bool {
        u64::try_from(population).map_or(true, |p| p < self.min_population)
    }
}

impl Default for CityReader {
    fn default() -> Self {
        Self::new()
    }
}

/// name, latitude, longitude, population, ISO country code
fn extract_fields(row: &StringRecord) -> Option<(&str, f64, f64, u64, &str)> {
    let name = row.get(CITY_NAME_COLUMN)?;
    let lat = parse_coordinate(row.get(CITY_LATITUDE_COLUMN)?)?;
    let lng = parse_coordinate(row.get(CITY_LONGITUDE_COLUMN)?)?;
    let raw_population = row.get(CITY_POPULATION_COLUMN)?;
    let population = if raw_population.is_empty() {
        0
    } else {
        raw_population.trim().parse::<u64>().ok()?
    };
    let iso_code = row.get(CITY_COUNTRY_CODE_COLUMN)?;

    Some((name, lat, lng, population, iso_code))
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
