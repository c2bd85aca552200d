use anyhow::{bail, Result};
use shapefile as shp;

/// Convert a shapefile shape into a geo::MultiPolygon<f64>.
///
/// Only polygon shapes are accepted; district boundary files carry nothing
/// else.
pub(crate) fn shape_to_multipolygon(shape: shp::Shape) -> Result<geo::MultiPolygon<f64>> {
    match shape {
        shp::Shape::Polygon(p) => Ok(polygon_to_multipolygon(&p)),
        other => bail!("unsupported geometry type in boundary file: {}", other.shapetype()),
    }
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>.
///
/// Shapefile stores rings flat, exteriors clockwise, each exterior followed
/// by its holes; regroup them into polygons.
fn polygon_to_multipolygon(p: &shp::Polygon) -> geo::MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<geo::Coord<f64>>) {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last {
                coords.push(first);
            }
        }
    }

    /// Get the signed area of a coord list (negative for exterior in shp order)
    fn signed_area(pts: &[geo::Coord<f64>]) -> f64 {
        pts.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum::<f64>() / 2.0
    }

    let mut polys: Vec<geo::Polygon<f64>> = Vec::new();
    let mut exterior: Option<geo::LineString<f64>> = None;
    let mut holes: Vec<geo::LineString<f64>> = Vec::new();

    for ring in p.rings() {
        let mut coords: Vec<geo::Coord<f64>> =
            ring.points().iter().map(|pt| geo::Coord { x: pt.x, y: pt.y }).collect();
        ensure_closed(&mut coords);
        let is_exterior = signed_area(&coords) < 0.0;
        let ls = geo::LineString(coords);

        if is_exterior {
            if let Some(ext) = exterior.take() {
                polys.push(geo::Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ls);
        } else {
            holes.push(ls);
        }
    }
    if let Some(ext) = exterior {
        polys.push(geo::Polygon::new(ext, holes));
    }

    geo::MultiPolygon(polys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::{Point, Polygon, PolygonRing};

    #[test]
    fn square_with_hole() {
        // Outer ring clockwise (shapefile exterior), inner counter-clockwise.
        let outer = PolygonRing::Outer(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 0.0),
        ]);
        let inner = PolygonRing::Inner(vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 3.0),
            Point::new(1.0, 1.0),
        ]);
        let mp = polygon_to_multipolygon(&Polygon::with_rings(vec![outer, inner]));
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn two_disjoint_squares() {
        let a = PolygonRing::Outer(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ]);
        let b = PolygonRing::Outer(vec![
            Point::new(5.0, 5.0),
            Point::new(5.0, 6.0),
            Point::new(6.0, 6.0),
            Point::new(6.0, 5.0),
            Point::new(5.0, 5.0),
        ]);
        let mp = polygon_to_multipolygon(&Polygon::with_rings(vec![a, b]));
        assert_eq!(mp.0.len(), 2);
    }
}
