use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use crate::colors::ColorTable;
use crate::results::{LongResults, VoteType, ANZAHL, GEBIETSNAME, GRUPPENART, GRUPPENNAME, PROZENT, STIMME};

/// One bar of the district detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyShare {
    pub party: String,
    pub percent: Option<f64>,
    pub count: Option<i64>,
    pub color: String,
}

/// Party-level shares for one district and vote type, in source order.
///
/// Rows qualify when `Gebietsname` matches the district, `Gruppenart` is
/// `Partei`, and `Stimme` matches the vote type. No matching rows is a
/// valid empty result, not an error.
pub fn detail_rows(
    results: &LongResults,
    district: &str,
    vote: VoteType,
    colors: &ColorTable,
) -> Result<Vec<PartyShare>> {
    let df = results.df();

    let districts = df.column(GEBIETSNAME)?.str()?.clone();
    let kinds = df.column(GRUPPENART)?.str()?.clone();
    let groups = df.column(GRUPPENNAME)?.str()?.clone();
    let ballots = df
        .column(STIMME)?
        .cast(&DataType::Int64)
        .with_context(|| format!("{STIMME} column is not numeric"))?;
    let ballots = ballots.i64()?.clone();
    let counts = df
        .column(ANZAHL)?
        .cast(&DataType::Int64)
        .with_context(|| format!("{ANZAHL} column is not numeric"))?;
    let counts = counts.i64()?.clone();
    let percents = df
        .column(PROZENT)?
        .f64()
        .with_context(|| format!("{PROZENT} column was not normalized at load"))?
        .clone();

    let wanted = vote.ballot_position();
    let mut rows = Vec::new();
    for row in 0..df.height() {
        if districts.get(row) != Some(district)
            || kinds.get(row) != Some("Partei")
            || ballots.get(row) != Some(wanted)
        {
            continue;
        }
        let party = match groups.get(row) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let color = colors.get(&party).to_string();
        rows.push(PartyShare { party, percent: percents.get(row), count: counts.get(row), color });
    }
    Ok(rows)
}
