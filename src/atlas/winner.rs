use anyhow::{Context, Result};
use polars::prelude::*;

use crate::colors::ColorTable;
use crate::results::{party_from_column, ResultKey};

/// Per-row best performer across the candidate columns.
///
/// Absent values rank strictly below every reported value, zero included,
/// so an all-zero district still has a real winner. Equal values keep the
/// earlier candidate (list order is the tie-break). Rows where every
/// candidate is absent get the fallback color, as does a winner whose party
/// has no color entry. The winning party is re-derived from the column name
/// (token before the first `_`).
pub(crate) fn winner_colors(
    df: &DataFrame,
    candidates: &[ResultKey],
    colors: &ColorTable,
) -> Result<Vec<String>> {
    let mut columns: Vec<(String, Float64Chunked)> = Vec::with_capacity(candidates.len());
    for key in candidates {
        let name = key.column_name();
        let col = df
            .column(&name)
            .with_context(|| format!("no result column {name:?} for candidate {:?}", key.party))?
            .cast(&DataType::Float64)
            .with_context(|| format!("result column {name:?} is not numeric"))?;
        columns.push((name, col.f64()?.clone()));
    }

    let mut fills = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut best: Option<(&str, f64)> = None;
        for (name, values) in &columns {
            if let Some(value) = values.get(row) {
                let better = match best {
                    Some((_, top)) => value > top,
                    None => true,
                };
                if better {
                    best = Some((name.as_str(), value));
                }
            }
        }
        fills.push(match best {
            Some((column, _)) => colors.get(party_from_column(column)).to_string(),
            None => colors.fallback().to_string(),
        });
    }
    Ok(fills)
}
