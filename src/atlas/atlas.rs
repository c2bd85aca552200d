use std::collections::HashMap;

use anyhow::{anyhow, ensure, Context, Result};
use geo::MultiPolygon;
use polars::prelude::*;

use super::district::Wahlkreise;
use super::{geojson, winner};
use crate::colors::ColorTable;
use crate::results::{ResultKey, WideResults, DISTRICT_KEY};

/// The joined view: one row per Wahlkreis with all wide result columns
/// attached, geometries still row-aligned.
#[derive(Debug, Clone)]
pub struct Atlas {
    df: DataFrame,
    geoms: Vec<MultiPolygon<f64>>,
}

impl Atlas {
    /// Left outer join of districts and wide results on the district key.
    ///
    /// Geometry is authoritative for row presence: every district appears
    /// exactly once, districts without results keep null result fields, and
    /// unmatched result rows are dropped. Row order follows the boundary
    /// source.
    pub fn join(districts: &Wahlkreise, results: &WideResults) -> Result<Self> {
        let joined = districts
            .data()
            .left_join(results.df(), [DISTRICT_KEY], [DISTRICT_KEY])
            .context("Failed to join districts with wide results")?;
        ensure!(
            joined.height() == districts.len(),
            "join changed district cardinality (got {}, expected {}); \
             wide results were not unique on {DISTRICT_KEY}",
            joined.height(),
            districts.len()
        );
        let df = align_to_source_order(districts.data(), joined)?;
        Ok(Self { df, geoms: districts.geoms().to_vec() })
    }

    #[inline]
    pub fn df(&self) -> &DataFrame {
        &self.df
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
    pub(crate) fn geoms(&self) -> &[MultiPolygon<f64>] {
        &self.geoms
    }

    /// Best-performer color per district for the given ordered candidates.
    pub fn winner_colors(
        &self,
        candidates: &[ResultKey],
        colors: &ColorTable,
    ) -> Result<Vec<String>> {
        winner::winner_colors(&self.df, candidates, colors)
    }

    /// Serializes the atlas as a GeoJSON FeatureCollection with the winner
    /// color under the `fill` property.
    pub fn to_geojson_bytes(
        &self,
        candidates: &[ResultKey],
        colors: &ColorTable,
    ) -> Result<Vec<u8>> {
        geojson::to_geojson_bytes(self, candidates, colors)
    }
}

/// Reorder joined rows to match the geometry source row for row.
///
/// The join output feeds a parallel geometry vector, and polars makes no
/// guarantee about join output order, so the alignment is enforced here
/// instead of assumed.
fn align_to_source_order(source: &DataFrame, joined: DataFrame) -> Result<DataFrame> {
    let source_keys = source.column(DISTRICT_KEY)?.i64()?.clone();
    let joined_keys = joined.column(DISTRICT_KEY)?.i64()?.clone();

    let mut row_by_key: HashMap<i64, IdxSize> = HashMap::with_capacity(joined.height());
    for (row, key) in joined_keys.into_no_null_iter().enumerate() {
        row_by_key.entry(key).or_insert(row as IdxSize);
    }

    let indices = source_keys
        .into_iter()
        .map(|key| {
            let key = key.ok_or_else(|| anyhow!("district with null {DISTRICT_KEY} key"))?;
            row_by_key
                .get(&key)
                .copied()
                .ok_or_else(|| anyhow!("district key {key} missing from join output"))
        })
        .collect::<Result<Vec<IdxSize>>>()?;

    Ok(joined.take(&IdxCa::from_vec("idx".into(), indices))?)
}
