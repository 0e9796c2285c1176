//! Display outline of a drawn path's buffer, and GeoJSON export
//!
//! The outline is for rendering only. Whether a station is inside a corridor
//! is always decided by [`crate::spatial::path_contains`].

use crate::distance::HAVERSINE_METERS;
use crate::models::{to_geo_point, DrawnPath, DrawnPathExt};
use geo::{Bearing, Destination, LineString, Point, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;

/// Buffer outline around a drawn path
///
/// Every vertex is offset perpendicular to its outgoing segment (the final
/// vertex uses the last segment). The ring runs along the left-hand offsets
/// and back along the right-hand offsets. Returns `None` for paths with
/// fewer than two points.
pub fn corridor_outline(path: &DrawnPath) -> Option<Polygon> {
    if !path.is_active() {
        return None;
    }

    let points = &path.points;
    let last = points.len() - 1;

    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());

    let vertices: Vec<Point> = points.iter().map(to_geo_point).collect();

    for (i, vertex) in vertices.iter().enumerate() {
        // degrees clockwise from north
        let heading = if i < last {
            HAVERSINE_METERS.bearing(*vertex, vertices[i + 1])
        } else {
            HAVERSINE_METERS.bearing(vertices[last - 1], *vertex)
        };

        left.push(HAVERSINE_METERS.destination(*vertex, heading - 90.0, path.buffer_meters));
        right.push(HAVERSINE_METERS.destination(*vertex, heading + 90.0, path.buffer_meters));
    }

    let ring: Vec<_> = left.iter().chain(right.iter().rev()).map(|point| point.0).collect();

    // Polygon::new closes the ring
    Some(Polygon::new(LineString::new(ring), vec![]))
}

/// GeoJSON features for a set of drawn paths: the route line and its
/// corridor outline for every active path
pub fn corridor_feature_collection<'a, I>(paths: I) -> FeatureCollection
where
    I: IntoIterator<Item = &'a DrawnPath>,
{
    let mut features = Vec::new();

    for (index, path) in paths.into_iter().enumerate() {
        let Some(outline) = corridor_outline(path) else {
            continue;
        };

        let route = path.to_line_string();
        features.push(feature(geojson::Value::from(&route), index, "route", path.buffer_meters));
        features.push(feature(geojson::Value::from(&outline), index, "corridor", path.buffer_meters));
    }

    FeatureCollection { bbox: None, features, foreign_members: None }
}

fn feature(value: geojson::Value, path_index: usize, kind: &str, buffer_meters: f64) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("path".to_string(), json!(path_index));
    properties.insert("kind".to_string(), json!(kind));
    properties.insert("buffer_meters".to_string(), json!(buffer_meters));

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance_meters;
    use crate::models::{from_geo_point, Coordinate};

    fn east_path() -> DrawnPath {
        DrawnPath::new(
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.05), Coordinate::new(0.0, 0.1)],
            Some(1000.0),
        )
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin: Point<f64> = Point::new(0.0, 0.0);
        assert!(HAVERSINE_METERS.bearing(origin, Point::new(0.0, 1.0)).abs() < 1e-9);
        assert!((HAVERSINE_METERS.bearing(origin, Point::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_destination_distance_uses_buffer_radius() {
        let origin = Coordinate::new(51.5, -0.12);
        let dest = from_geo_point(HAVERSINE_METERS.destination(to_geo_point(&origin), 57.3, 2500.0));
        assert!((distance_meters(origin, dest) - 2500.0).abs() < 0.01);
    }

    #[test]
    fn test_outline_offsets_every_vertex() {
        let outline = corridor_outline(&east_path()).unwrap();
        let ring = outline.exterior();

        // three left offsets, three right offsets, closing coordinate
        assert_eq!(ring.0.len(), 7);
        assert_eq!(ring.0.first(), ring.0.last());

        // heading east: left side is north of the path, right side is south
        assert!(ring.0[0].y > 0.0);
        assert!(ring.0[3].y < 0.0);

        for coord in &ring.0 {
            let vertex = Coordinate::new(0.0, coord.x);
            let d = distance_meters(vertex, Coordinate::new(coord.y, coord.x));
            assert!((d - 1000.0).abs() < 1.0, "offset {} should be ~1000m", d);
        }
    }

    #[test]
    fn test_inactive_path_has_no_outline() {
        let path = DrawnPath::new(vec![Coordinate::new(0.0, 0.0)], None);
        assert!(corridor_outline(&path).is_none());
    }

    #[test]
    fn test_feature_collection_skips_inactive_paths() {
        let inactive = DrawnPath::new(vec![], None);
        let collection = corridor_feature_collection([&east_path(), &inactive]);

        assert_eq!(collection.features.len(), 2);
        let kinds: Vec<_> = collection
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["route", "corridor"]);

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][1]["geometry"]["type"], "Polygon");
    }
}
