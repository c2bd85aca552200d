use std::io::Write;

use anyhow::Result;

use crate::atlas::{Atlas, Wahlkreise};
use crate::cli::{Cli, KarteArgs};
use crate::colors::ColorTable;
use crate::common::{assert_not_stdout, finalize_big_write, open_for_big_write};
use crate::results::{ResultKey, WideResults, DEFAULT_PARTIES};

pub fn run(cli: &Cli, args: &KarteArgs) -> Result<()> {
    assert_not_stdout(&args.output)?;

    if cli.verbose > 0 {
        eprintln!("[karte] loading district boundaries from {}", args.districts.display());
    }
    let districts = Wahlkreise::from_shapefile(&args.districts)?;

    if cli.verbose > 0 {
        eprintln!("[karte] loading wide results from {}", args.results.display());
    }
    let results = WideResults::from_path(&args.results)?;

    if cli.verbose > 0 {
        eprintln!(
            "[karte] joining {} districts with {} result rows",
            districts.len(),
            results.height()
        );
    }
    let atlas = Atlas::join(&districts, &results)?;

    let candidates = ResultKey::candidates(&DEFAULT_PARTIES, args.vote, args.period);
    let colors = ColorTable::winner_defaults();

    if cli.verbose > 0 {
        eprintln!("[karte] rendering GeoJSON ({} {})", args.vote, args.period);
    }
    let bytes = atlas.to_geojson_bytes(&candidates, &colors)?;

    let mut sink = open_for_big_write(&args.output, args.force)?;
    sink.write_all(&bytes)?;
    finalize_big_write(sink)?;
    println!("Wrote map -> {}", args.output.display());

    Ok(())
}
