use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, ensure, Context, Result};
use polars::prelude::*;

use crate::common;

pub(crate) const GEBIETSNAME: &str = "Gebietsname";
pub(crate) const GRUPPENNAME: &str = "Gruppenname";
pub(crate) const GRUPPENART: &str = "Gruppenart";
pub(crate) const STIMME: &str = "Stimme";
pub(crate) const ANZAHL: &str = "Anzahl";
pub(crate) const PROZENT: &str = "Prozent";

/// Long-format results: one row per (district, group, vote type).
///
/// `Prozent` arrives with a decimal comma and is normalized to `f64` at
/// load. An empty cell is valid "no data"; a malformed non-empty cell is a
/// load error, never a silent zero.
#[derive(Debug, Clone)]
pub struct LongResults {
    df: DataFrame,
}

impl LongResults {
    /// Loads from a `;`-separated file with a single header row.
    pub fn from_path(path: &Path) -> Result<Self> {
        common::require_file_exists(path)?;
        let df = common::read_semicolon_csv(path)?;
        Self::from_frame(df)
            .with_context(|| format!("Failed to parse long results from {}", path.display()))
    }

    /// Parses from raw bytes (for tests and in-memory hosts).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_frame(common::read_semicolon_csv_bytes(bytes)?)
    }

    fn from_frame(mut df: DataFrame) -> Result<Self> {
        for required in [GEBIETSNAME, GRUPPENNAME, GRUPPENART, STIMME, ANZAHL, PROZENT] {
            ensure!(df.column(required).is_ok(), "long results are missing column {required:?}");
        }
        let prozent = normalize_percent(df.column(PROZENT)?)?;
        df.replace(PROZENT, prozent)?;
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

    /// Distinct district names in source order (feeds the district picker).
    pub fn district_names(&self) -> Result<Vec<String>> {
        let column = self.df.column(GEBIETSNAME)?.str()?.clone();
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for name in column.into_iter().flatten() {
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Parses the decimal-comma `Prozent` column to `f64`. Empty -> null,
/// malformed -> error.
fn normalize_percent(column: &Column) -> Result<Series> {
    let values: Vec<Option<f64>> = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|cell| match cell {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => raw
                    .trim()
                    .replace(',', ".")
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| anyhow!("malformed percentage value {raw:?}")),
            })
            .collect::<Result<_>>()?,
        // a file using decimal points parses straight to floats
        _ => column
            .cast(&DataType::Float64)
            .with_context(|| format!("{PROZENT} column is neither text nor numeric"))?
            .f64()?
            .into_iter()
            .collect(),
    };
    Ok(Series::new(PROZENT.into(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Gebietsname;Gruppenname;Gruppenart;Stimme;Anzahl;Prozent\n\
Flensburg - Schleswig;SPD;Partei;2;60000;28,1\n\
Flensburg - Schleswig;CDU;Partei;2;51000;23,9\n\
Aalen - Heidenheim;CDU;Partei;2;71000;33,4\n\
Aalen - Heidenheim;Wahlberechtigte;Allgemein;2;210000;\n";

    #[test]
    fn comma_percent_parses() {
        let long = LongResults::from_bytes(SAMPLE.as_bytes()).unwrap();
        let prozent = long.df().column(PROZENT).unwrap().f64().unwrap().clone();
        assert_eq!(prozent.get(0), Some(28.1));
        assert_eq!(prozent.get(3), None);
    }

    #[test]
    fn twelve_comma_five_is_twelve_point_five() {
        let sample = "Gebietsname;Gruppenname;Gruppenart;Stimme;Anzahl;Prozent\n\
                      X;Y;Partei;2;10;12,5\n";
        let long = LongResults::from_bytes(sample.as_bytes()).unwrap();
        assert_eq!(long.df().column(PROZENT).unwrap().f64().unwrap().get(0), Some(12.5));
    }

    #[test]
    fn malformed_percent_is_an_error() {
        let sample = "Gebietsname;Gruppenname;Gruppenart;Stimme;Anzahl;Prozent\n\
                      X;Y;Partei;2;10;n/a\n";
        let err = LongResults::from_bytes(sample.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("malformed percentage"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let sample = "Gebietsname;Gruppenname;Stimme;Anzahl;Prozent\nX;Y;2;10;1,0\n";
        assert!(LongResults::from_bytes(sample.as_bytes()).is_err());
    }

    #[test]
    fn district_names_are_distinct_in_source_order() {
        let long = LongResults::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            long.district_names().unwrap(),
            ["Flensburg - Schleswig", "Aalen - Heidenheim"]
        );
    }
}
