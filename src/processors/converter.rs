use crate::config::ConvertConfig;
use crate::error::Result;
use crate::processors::ExtractionReport;
use crate::readers::{CityReader, CountryReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::JsonWriter;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a completed conversion
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub countries_loaded: usize,
    pub records_written: usize,
    pub output_file: PathBuf,
    pub report: ExtractionReport,
}

impl ConversionSummary {
    /// Final line printed after a conversion
    pub fn count_line(&self) -> String {
        format!(
            "Converted {} cities to {}",
            self.records_written,
            self.output_file.display()
        )
    }
}

/// Runs the three conversion stages in order: country table, gazetteer, JSON output.
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn run(&self, progress: Option<&ProgressReporter>) -> Result<ConversionSummary> {
        let countries = CountryReader::new().read_countries(&self.config.country_file)?;

        if let Some(progress) = progress {
            progress.set_message("Extracting cities...");
        }
        let reader = CityReader::new()
            .with_min_population(self.config.min_population)
            .with_policy(self.config.population_policy);
        let (cities, report) = reader.read_cities(&self.config.cities_file, &countries, progress)?;

        if let Some(progress) = progress {
            progress.set_message("Writing JSON...");
        }
        let records_written = JsonWriter::new().write_records(&cities, &self.config.output_file)?;

        info!(
            records = records_written,
            output = %self.config.output_file.display(),
            "Conversion complete"
        );

        Ok(ConversionSummary {
            countries_loaded: countries.len(),
            records_written,
            output_file: self.config.output_file.clone(),
            report,
        })
    }
}
