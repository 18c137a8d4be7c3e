use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigOverrides, ConvertConfig};
use crate::error::{ConversionError, Result};
use crate::processors::Converter;
use crate::utils::progress::ProgressReporter;
use crate::writers::JsonWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Convert {
            cities_file,
            country_file,
            output_file,
            min_population,
            strict,
            quiet,
        } => {
            let config = ConvertConfig::load(cli.config.as_deref())?.with_overrides(
                ConfigOverrides {
                    cities_file,
                    country_file,
                    output_file,
                    min_population,
                    strict,
                },
            )?;

            if !quiet {
                println!("Converting gazetteer data...");
                println!("Cities file: {}", config.cities_file.display());
                println!("Country file: {}", config.country_file.display());
                println!(
                    "Minimum population: {}, policy: {:?}",
                    config.min_population, config.population_policy
                );
            }

            let progress = ProgressReporter::new_spinner("Loading country table...", quiet);
            let summary = Converter::new(config).run(Some(&progress))?;
            progress.finish_with_message(&format!(
                "Processed {} rows",
                summary.report.rows_read
            ));

            if !quiet {
                println!("Loaded {} countries", summary.countries_loaded);
                println!("\n{}", summary.report.summary());
            }

            println!("{}", summary.count_line());
        }

        Commands::Info { file, sample } => {
            println!("Analyzing JSON file: {}", file.display());

            let writer = JsonWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing up to {} records):", sample);
                let records = writer.read_records(&file)?;
                for (i, city) in records.iter().take(sample).enumerate() {
                    println!(
                        "{}. {}, {} ({:.4}, {:.4}): population {}",
                        i + 1,
                        city.name,
                        city.country,
                        city.lat,
                        city.lng,
                        city.population
                    );
                }
            }
        }
    }

    Ok(())
}

/// Install the global tracing subscriber, writing to stderr or to `log_file`
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder().with_max_level(level);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing::subscriber::set_global_default(
                builder.with_ansi(false).with_writer(Mutex::new(file)).finish(),
            )
        }
        None => tracing::subscriber::set_global_default(
            builder.with_writer(std::io::stderr).finish(),
        ),
    };
    installed.map_err(|e| ConversionError::Config(format!("Could not install logger: {}", e)))?;

    Ok(())
}
