//! Geometry models for sitelocator-geo.
//!
//! This module re-exports canonical types from `sitelocator-core` and provides
//! conversions to the `geo` crate. `geo` stores x = longitude, y = latitude.

use geo::{Coord, LineString, Point};

pub use sitelocator_core::models::{Coordinate, DrawnPath, PathDistance};

/// Convert a canonical coordinate to a `geo::Coord`
pub fn to_geo_coord(coordinate: &Coordinate) -> Coord {
    Coord { x: coordinate.lng, y: coordinate.lat }
}

/// Convert a canonical coordinate to a `geo::Point`
pub fn to_geo_point(coordinate: &Coordinate) -> Point {
    Point::new(coordinate.lng, coordinate.lat)
}

/// Convert a `geo::Point` back to a canonical coordinate
pub fn from_geo_point(point: Point) -> Coordinate {
    Coordinate::new(point.y(), point.x())
}

/// Extension trait for drawn paths with geo-crate conversions
pub trait DrawnPathExt {
    /// The path's vertices as a line string
    fn to_line_string(&self) -> LineString;
}

impl DrawnPathExt for DrawnPath {
    fn to_line_string(&self) -> LineString {
        LineString::new(self.points.iter().map(to_geo_coord).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_order() {
        let coord = to_geo_coord(&Coordinate::new(51.5, -0.12));
        assert_eq!(coord.x, -0.12);
        assert_eq!(coord.y, 51.5);

        let point = to_geo_point(&Coordinate::new(51.5, -0.12));
        assert_eq!((point.x(), point.y()), (-0.12, 51.5));
        assert_eq!(from_geo_point(point), Coordinate::new(51.5, -0.12));
    }

    #[test]
    fn test_path_to_line_string() {
        let path = DrawnPath::new(
            vec![Coordinate::new(51.0, -1.0), Coordinate::new(51.1, -1.1)],
            None,
        );
        let line = path.to_line_string();
        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[1], Coord { x: -1.1, y: 51.1 });
    }
}
