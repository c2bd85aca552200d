use anyhow::{Context, Result};
use geo::{LineString, MultiPolygon};
use polars::prelude::*;
use serde_json::{json, Map, Value};

use super::Atlas;
use crate::colors::ColorTable;
use crate::results::{ResultKey, DISTRICT_KEY};

/// Serialize the joined atlas as a GeoJSON FeatureCollection.
///
/// One feature per Wahlkreis: MultiPolygon geometry, the identifying
/// attributes plus the selected result columns as tooltip-ready properties,
/// and the winner color under `fill`.
pub(crate) fn to_geojson_bytes(
    atlas: &Atlas,
    candidates: &[ResultKey],
    colors: &ColorTable,
) -> Result<Vec<u8>> {
    let fills = atlas.winner_colors(candidates, colors)?;

    let df = atlas.df();
    let keys = df.column(DISTRICT_KEY)?.i64()?.clone();
    let names = df.column("WKR_NAME")?.str()?.clone();
    let land_nrs = df.column("LAND_NR")?.str()?.clone();
    let land_names = df.column("LAND_NAME")?.str()?.clone();

    let mut result_columns: Vec<(String, Float64Chunked)> = Vec::with_capacity(candidates.len());
    for key in candidates {
        let name = key.column_name();
        let col = df
            .column(&name)
            .with_context(|| format!("no result column {name:?}"))?
            .cast(&DataType::Float64)?;
        result_columns.push((name, col.f64()?.clone()));
    }

    let features: Vec<Value> = atlas
        .geoms()
        .iter()
        .enumerate()
        .map(|(row, geometry)| {
            let mut properties = Map::new();
            properties.insert(DISTRICT_KEY.to_string(), json!(keys.get(row)));
            properties.insert("WKR_NAME".to_string(), json!(names.get(row)));
            properties.insert("LAND_NR".to_string(), json!(land_nrs.get(row)));
            properties.insert("LAND_NAME".to_string(), json!(land_names.get(row)));
            for (name, values) in &result_columns {
                properties.insert(name.clone(), json!(values.get(row)));
            }
            properties.insert("fill".to_string(), json!(fills[row]));

            json!({
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": multipolygon_coords(geometry),
                },
                "properties": properties,
            })
        })
        .collect();

    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&feature_collection).context("Failed to serialize GeoJSON")
}

fn multipolygon_coords(mp: &MultiPolygon<f64>) -> Vec<Value> {
    mp.0.iter()
        .map(|polygon| {
            let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
            rings.push(ring_coords(polygon.exterior()));
            rings.extend(polygon.interiors().iter().map(ring_coords));
            json!(rings)
        })
        .collect()
}

fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Wahlkreise;
    use crate::results::{Period, VoteType, WideResults};
    use geo::{Coord, Polygon};

    fn atlas() -> Atlas {
        let ring = LineString(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ]);
        let data = DataFrame::new(vec![
            Column::new(DISTRICT_KEY.into(), vec![7i64]),
            Column::new("WKR_NAME".into(), vec!["Aalen - Heidenheim"]),
            Column::new("LAND_NR".into(), vec!["08"]),
            Column::new("LAND_NAME".into(), vec!["Baden-Württemberg"]),
        ])
        .unwrap();
        let districts = Wahlkreise::from_parts(
            data,
            vec![MultiPolygon(vec![Polygon::new(ring, vec![])])],
        )
        .unwrap();

        let wide = WideResults::from_bytes(
            "WKR_NR;CDU;SPD\n;Zweitstimmen;Zweitstimmen\n;Vorläufig;Vorläufig\n7;71000;52000\n"
                .as_bytes(),
        )
        .unwrap();
        Atlas::join(&districts, &wide).unwrap()
    }

    #[test]
    fn features_carry_fill_and_tooltip_properties() {
        let candidates =
            ResultKey::candidates(&["CDU", "SPD"], VoteType::Zweitstimmen, Period::Vorlaeufig);
        let colors = ColorTable::winner_defaults();
        let bytes = atlas().to_geojson_bytes(&candidates, &colors).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(feature["properties"]["WKR_NR"], 7);
        assert_eq!(feature["properties"]["WKR_NAME"], "Aalen - Heidenheim");
        assert_eq!(feature["properties"]["LAND_NR"], "08");
        assert_eq!(feature["properties"]["CDU_Zweitstimmen_Vorläufig"], 71000.0);
        assert_eq!(feature["properties"]["fill"], "#000000");
        assert_eq!(feature["geometry"]["type"], "MultiPolygon");
        // one polygon, one ring, four positions
        assert_eq!(feature["geometry"]["coordinates"][0][0].as_array().unwrap().len(), 4);
    }
}
