use anyhow::Result;
use clap::Parser;

use careatlas::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    careatlas::run(&cli)
}
