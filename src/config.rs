use crate::error::{ConversionError, Result};
use crate::utils::constants::{
    DEFAULT_CITIES_FILE, DEFAULT_COUNTRY_FILE, DEFAULT_MIN_POPULATION, DEFAULT_OUTPUT_FILE,
    ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a gazetteer row whose population column is missing or not an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationPolicy {
    /// Check the column count first and skip rows with an unusable population.
    #[default]
    Lenient,
    /// Filter on population before the column count check and abort the run on
    /// an unusable population. A row too short to have a population column
    /// therefore aborts the run instead of being skipped.
    ///
    /// Blank lines never reach the row check: the CSV reader drops them under
    /// either policy.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub cities_file: PathBuf,
    pub country_file: PathBuf,
    pub output_file: PathBuf,
    pub min_population: u64,
    pub population_policy: PopulationPolicy,
}

/// Values given on the command line; they take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub cities_file: Option<PathBuf>,
    pub country_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub min_population: Option<u64>,
    pub strict: bool,
}

impl ConvertConfig {
    /// Layer defaults, an optional config file and `GAZETTEER_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("cities_file", DEFAULT_CITIES_FILE)?
            .set_default("country_file", DEFAULT_COUNTRY_FILE)?
            .set_default("output_file", DEFAULT_OUTPUT_FILE)?
            .set_default("min_population", DEFAULT_MIN_POPULATION as i64)?
            .set_default("population_policy", "lenient")?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: ConvertConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.check()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(path) = overrides.cities_file {
            self.cities_file = path;
        }
        if let Some(path) = overrides.country_file {
            self.country_file = path;
        }
        if let Some(path) = overrides.output_file {
            self.output_file = path;
        }
        if let Some(min_population) = overrides.min_population {
            self.min_population = min_population;
        }
        if overrides.strict {
            self.population_policy = PopulationPolicy::Strict;
        }

        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<()> {
        for (key, path) in [
            ("cities_file", &self.cities_file),
            ("country_file", &self.country_file),
            ("output_file", &self.output_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConversionError::Config(format!("{} must not be empty", key)));
            }
        }

        if self.output_file == self.cities_file || self.output_file == self.country_file {
            return Err(ConversionError::Config(format!(
                "Output file {} would overwrite an input file",
                self.output_file.display()
            )));
        }

        Ok(())
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            cities_file: PathBuf::from(DEFAULT_CITIES_FILE),
            country_file: PathBuf::from(DEFAULT_COUNTRY_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            min_population: DEFAULT_MIN_POPULATION,
            population_policy: PopulationPolicy::default(),
        }
    }
}
