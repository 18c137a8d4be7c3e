use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gazetteer-converter")]
#[command(about = "Convert GeoNames gazetteer data into a JSON array of cities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging, including per-row diagnostics")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the gazetteer and country table into a JSON array of cities
    Convert {
        #[arg(long, help = "Gazetteer file or zip archive [default: cities1000.txt]")]
        cities_file: Option<PathBuf>,

        #[arg(long, help = "Country table [default: countryInfo.txt]")]
        country_file: Option<PathBuf>,

        #[arg(short, long, help = "Output JSON file [default: cities.json]")]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "Minimum population to keep a city [default: 5000]")]
        min_population: Option<u64>,

        #[arg(
            long,
            help = "Abort on a missing or non-numeric population instead of skipping the row"
        )]
        strict: bool,

        #[arg(short, long, help = "Only print the final count line")]
        quiet: bool,
    },

    /// Display information about a converted JSON file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}
