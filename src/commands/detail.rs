use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::{Cli, DetailArgs};
use crate::colors::ColorTable;
use crate::common::{assert_not_stdout, finalize_big_write, open_for_big_write};
use crate::detail::detail_rows;
use crate::results::LongResults;

pub fn run(cli: &Cli, args: &DetailArgs) -> Result<()> {
    if cli.verbose > 0 {
        eprintln!("[detail] loading long results from {}", args.results.display());
    }
    let results = LongResults::from_path(&args.results)?;

    let colors = ColorTable::chart_defaults();
    let rows = detail_rows(&results, &args.district, args.vote, &colors)?;
    if cli.verbose > 0 {
        eprintln!("[detail] {} parties in {:?} ({})", rows.len(), args.district, args.vote);
    }

    let json = serde_json::to_string_pretty(&rows).context("Failed to serialize detail rows")?;
    match &args.output {
        Some(path) => {
            assert_not_stdout(path)?;
            let mut sink = open_for_big_write(path, args.force)?;
            sink.write_all(json.as_bytes())?;
            sink.write_all(b"\n")?;
            finalize_big_write(sink)?;
            println!("Wrote detail -> {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
