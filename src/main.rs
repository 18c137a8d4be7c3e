use clap::Parser;
use gazetteer_converter::cli::{run, Cli};
use gazetteer_converter::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
