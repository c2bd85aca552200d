use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use geo::MultiPolygon;
use polars::prelude::*;
use shapefile::dbase::{FieldValue, Record};

use crate::common;
use crate::results::DISTRICT_KEY;

/// Wahlkreis boundary layer: attribute table plus a parallel geometry store.
///
/// Geometry is carried as an opaque attachment, row-aligned with the
/// attribute table; nothing downstream inspects it beyond serializing it
/// back out.
#[derive(Debug, Clone)]
pub struct Wahlkreise {
    data: DataFrame,
    geoms: Vec<MultiPolygon<f64>>,
}

impl Wahlkreise {
    /// Loads districts from a boundary shapefile (one polygon per Wahlkreis).
    pub fn from_shapefile(path: &Path) -> Result<Self> {
        common::require_file_exists(path)?;
        let items = common::read_shapefile(path)?;

        let mut geoms = Vec::with_capacity(items.len());
        let mut records = Vec::with_capacity(items.len());
        for (shape, record) in items {
            geoms.push(
                common::shape_to_multipolygon(shape)
                    .with_context(|| format!("Bad geometry in {}", path.display()))?,
            );
            records.push(record);
        }

        let data = records_to_dataframe(&records)
            .with_context(|| format!("Bad attribute table in {}", path.display()))?;
        Self::from_parts(data, geoms)
    }

    /// Builds a layer from an attribute table and row-aligned geometries.
    pub fn from_parts(data: DataFrame, geoms: Vec<MultiPolygon<f64>>) -> Result<Self> {
        ensure!(
            data.height() == geoms.len(),
            "attribute table has {} rows but {} geometries were provided",
            data.height(),
            geoms.len()
        );
        ensure!(
            data.column(DISTRICT_KEY).is_ok(),
            "district attribute table is missing the {DISTRICT_KEY} column"
        );
        Ok(Self { data, geoms })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.geoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geoms.is_empty()
    }

    #[inline]
    pub(crate) fn data(&self) -> &DataFrame {
        &self.data
    }

    #[inline]
    pub(crate) fn geoms(&self) -> &[MultiPolygon<f64>] {
        &self.geoms
    }
}

/// Builds the attribute DataFrame from dBase records. `LAND_NR` stays text:
/// federal-state codes carry leading zeros.
fn records_to_dataframe(records: &[Record]) -> Result<DataFrame> {
    /// Get the value of a character field from a Record
    fn character_field(record: &Record, field: &str) -> Result<String> {
        match record.get(field) {
            Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
            _ => bail!("missing or invalid character field: {}", field),
        }
    }

    /// Get the district key, accepting numeric or numeric-text fields
    fn key_field(record: &Record, field: &str) -> Result<i64> {
        match record.get(field) {
            Some(FieldValue::Numeric(Some(n))) => Ok(*n as i64),
            Some(FieldValue::Character(Some(s))) => s
                .trim()
                .parse()
                .with_context(|| format!("non-numeric district key: {s:?}")),
            _ => bail!("missing or invalid district key field: {}", field),
        }
    }

    /// Get a region code as text, zero-padding numeric sources
    fn region_field(record: &Record, field: &str) -> Result<String> {
        match record.get(field) {
            Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
            Some(FieldValue::Numeric(Some(n))) => Ok(format!("{:02}", *n as i64)),
            _ => bail!("missing or invalid region field: {}", field),
        }
    }

    Ok(DataFrame::new(vec![
        Column::new(
            DISTRICT_KEY.into(),
            records.iter().map(|r| key_field(r, "WKR_NR")).collect::<Result<Vec<_>>>()?,
        ),
        Column::new(
            "WKR_NAME".into(),
            records.iter().map(|r| character_field(r, "WKR_NAME")).collect::<Result<Vec<_>>>()?,
        ),
        Column::new(
            "LAND_NR".into(),
            records.iter().map(|r| region_field(r, "LAND_NR")).collect::<Result<Vec<_>>>()?,
        ),
        Column::new(
            "LAND_NAME".into(),
            records.iter().map(|r| character_field(r, "LAND_NAME")).collect::<Result<Vec<_>>>()?,
        ),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString, Polygon};

    pub(crate) fn square(origin: f64) -> MultiPolygon<f64> {
        let ring = LineString(vec![
            Coord { x: origin, y: origin },
            Coord { x: origin + 1.0, y: origin },
            Coord { x: origin + 1.0, y: origin + 1.0 },
            Coord { x: origin, y: origin + 1.0 },
            Coord { x: origin, y: origin },
        ]);
        MultiPolygon(vec![Polygon::new(ring, vec![])])
    }

    #[test]
    fn from_parts_checks_alignment() {
        let data = DataFrame::new(vec![
            Column::new(DISTRICT_KEY.into(), vec![1i64, 2]),
            Column::new("WKR_NAME".into(), vec!["A", "B"]),
        ])
        .unwrap();
        assert!(Wahlkreise::from_parts(data.clone(), vec![square(0.0)]).is_err());
        let districts = Wahlkreise::from_parts(data, vec![square(0.0), square(2.0)]).unwrap();
        assert_eq!(districts.len(), 2);
    }

    #[test]
    fn from_parts_requires_key_column() {
        let data = DataFrame::new(vec![Column::new("WKR_NAME".into(), vec!["A"])]).unwrap();
        assert!(Wahlkreise::from_parts(data, vec![square(0.0)]).is_err());
    }
}
