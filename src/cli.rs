use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::results::{Period, VoteType};

/// Wahlatlas CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "wahlatlas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the Wahlkreis map as winner-colored GeoJSON
    Karte(KarteArgs),

    /// Export one district's party-level result rows as JSON
    Detail(DetailArgs),

    /// List the distinct district names in the long-format results
    Districts(DistrictsArgs),
}

#[derive(Args, Debug)]
pub struct KarteArgs {
    /// Wahlkreis boundary shapefile (.shp)
    #[arg(value_hint = ValueHint::FilePath)]
    pub districts: PathBuf,

    /// Wide-format results file (three header rows, `;`-separated)
    #[arg(value_hint = ValueHint::FilePath)]
    pub results: PathBuf,

    /// Output GeoJSON file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Erst- oder Zweitstimmen
    #[arg(long, value_enum, default_value = "zweitstimmen")]
    pub vote: VoteType,

    /// Current (Vorläufig) or previous (Vorperiode) result set
    #[arg(long, value_enum, default_value = "vorlaeufig")]
    pub period: Period,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Long-format results file (`;`-separated, single header row)
    #[arg(value_hint = ValueHint::FilePath)]
    pub results: PathBuf,

    /// District name (Gebietsname) to filter on
    #[arg(long)]
    pub district: String,

    /// Erst- oder Zweitstimmen
    #[arg(long, value_enum, default_value = "zweitstimmen")]
    pub vote: VoteType,

    /// Output JSON file (stdout when omitted)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct DistrictsArgs {
    /// Long-format results file (`;`-separated, single header row)
    #[arg(value_hint = ValueHint::FilePath)]
    pub results: PathBuf,
}
