use anyhow::Result;
use clap::Parser;

use wahlatlas::cli::{Cli, Commands};
use wahlatlas::commands::{detail, districts, karte};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Karte(args) => karte::run(&cli, args),
        Commands::Detail(args) => detail::run(&cli, args),
        Commands::Districts(args) => districts::run(&cli, args),
    }
}
