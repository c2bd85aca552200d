use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Context, Result};
use polars::prelude::*;

use super::columns::{flatten_header, ResultKey, DISTRICT_KEY};
use crate::common;

/// Wide-format results: one row per Wahlkreis, one numeric column per
/// (party, vote type, period) triple.
///
/// Normalization happens entirely at load: the three header rows are
/// flattened into compound column names, the district-key column is renamed
/// to [`DISTRICT_KEY`] and coerced to integers (absent keys become 0), and
/// rows with duplicate keys are dropped keeping the first occurrence.
#[derive(Debug, Clone)]
pub struct WideResults {
    df: DataFrame,
}

impl WideResults {
    /// Loads from a `;`-separated file whose first three rows are header
    /// levels. Missing or malformed files are fatal.
    pub fn from_path(path: &Path) -> Result<Self> {
        common::require_file_exists(path)?;
        let raw = fs::read(path)
            .with_context(|| format!("Failed to read results file: {}", path.display()))?;
        Self::from_bytes(&raw)
            .with_context(|| format!("Failed to parse wide results from {}", path.display()))
    }

    /// Parses from raw bytes (three header rows + `;`-separated body).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).context("wide results are not valid UTF-8")?;
        let (names, body) = flatten_three_level_header(text)?;

        let mut df = common::read_semicolon_body(body.as_bytes())?;
        ensure!(
            names.len() == df.width(),
            "header defines {} columns but body rows have {}",
            names.len(),
            df.width()
        );
        df.set_column_names(names.iter().map(String::as_str))?;

        canonicalize_key_column(&mut df)?;
        coerce_key_column(&mut df)?;
        let df = dedup_on_key(df)?;

        Ok(Self { df })
    }

    #[inline]
    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Resolves a typed key to its numeric column. A key whose column does
    /// not exist in the table is an error, never a silent all-null lookup.
    pub fn column(&self, key: &ResultKey) -> Result<Float64Chunked> {
        let name = key.column_name();
        let col = self
            .df
            .column(&name)
            .with_context(|| format!("no result column {name:?} (party {:?})", key.party))?
            .cast(&DataType::Float64)
            .with_context(|| format!("result column {name:?} is not numeric"))?;
        Ok(col.f64()?.clone())
    }
}

/// Splits off the first three lines and flattens them column-wise with `_`.
/// Columns that are blank on all three levels get a positional placeholder.
fn flatten_three_level_header(text: &str) -> Result<(Vec<String>, &str)> {
    let mut rest = text;
    let mut levels: Vec<Vec<&str>> = Vec::with_capacity(3);
    for _ in 0..3 {
        let (line, tail) = match rest.split_once('\n') {
            Some(split) => split,
            None => bail!("wide results need three header rows"),
        };
        levels.push(line.trim_end_matches('\r').split(';').map(str::trim).collect());
        rest = tail;
    }

    let width = levels.iter().map(Vec::len).max().unwrap_or(0);
    let names = (0..width)
        .map(|i| {
            let name =
                flatten_header(levels.iter().map(|level| level.get(i).copied().unwrap_or("")));
            if name.is_empty() { format!("Unnamed_{i}") } else { name }
        })
        .collect();

    Ok((names, rest))
}

/// Renames the flattened district-key column to the canonical [`DISTRICT_KEY`].
/// Covers both a clean `WKR_NR` (blank lower levels) and variants where the
/// lower levels carried filler text.
fn canonicalize_key_column(df: &mut DataFrame) -> Result<()> {
    let prefixed = format!("{DISTRICT_KEY}_");
    let source = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .find(|name| *name == DISTRICT_KEY || name.starts_with(&prefixed))
        .map(str::to_string);

    match source {
        Some(name) if name != DISTRICT_KEY => {
            df.rename(&name, DISTRICT_KEY.into())?;
        }
        Some(_) => {}
        None => bail!("wide results are missing the {DISTRICT_KEY} key column"),
    }
    Ok(())
}

/// Coerces the key column to integers. Only genuinely absent keys default
/// to 0; a non-empty cell that is not a number is a load error, never a
/// silent 0.
fn coerce_key_column(df: &mut DataFrame) -> Result<()> {
    let column = df.column(DISTRICT_KEY)?;
    let keys: Vec<i64> = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|cell| match cell {
                None => Ok(0),
                Some(raw) if raw.trim().is_empty() => Ok(0),
                Some(raw) => raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| anyhow!("malformed {DISTRICT_KEY} key {raw:?}")),
            })
            .collect::<Result<_>>()?,
        _ => column
            .cast(&DataType::Int64)
            .with_context(|| format!("{DISTRICT_KEY} column cannot be coerced to integers"))?
            .i64()?
            .into_iter()
            .map(|key| key.unwrap_or(0))
            .collect(),
    };
    df.replace(DISTRICT_KEY, Series::new(DISTRICT_KEY.into(), keys))?;
    Ok(())
}

/// Drops rows whose key was already seen, keeping the first occurrence.
/// Duplicates point at an upstream export defect, so they are reported.
fn dedup_on_key(df: DataFrame) -> Result<DataFrame> {
    let keys = df.column(DISTRICT_KEY)?.i64()?.clone();
    let mut seen = HashSet::with_capacity(df.height());
    let mut dupes: Vec<i64> = Vec::new();
    let keep: Vec<bool> = keys
        .into_no_null_iter()
        .map(|key| {
            let first = seen.insert(key);
            if !first {
                dupes.push(key);
            }
            first
        })
        .collect();

    if dupes.is_empty() {
        return Ok(df);
    }
    dupes.sort_unstable();
    dupes.dedup();
    eprintln!(
        "[wide] warning: dropped {} duplicate {DISTRICT_KEY} row(s), keeping first occurrence: {:?}",
        keep.iter().filter(|&&k| !k).count(),
        dupes
    );
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(df.filter(&mask)?)
}
