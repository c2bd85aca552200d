use anyhow::Result;

use crate::cli::{Cli, DistrictsArgs};
use crate::results::LongResults;

pub fn run(cli: &Cli, args: &DistrictsArgs) -> Result<()> {
    let results = LongResults::from_path(&args.results)?;
    let names = results.district_names()?;
    if cli.verbose > 0 {
        eprintln!("[districts] {} distinct districts in {}", names.len(), args.results.display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
