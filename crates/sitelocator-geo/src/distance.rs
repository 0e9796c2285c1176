//! Great-circle distance (Haversine)

use crate::models::to_geo_point;
use geo::{Distance, HaversineMeasure, Point};
use sitelocator_core::models::Coordinate;

/// Earth radius used for distances reported in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Earth radius used for drawn-path buffers
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine on a sphere measured in miles
pub const HAVERSINE_MILES: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_MILES);

/// Haversine on a sphere measured in meters
pub const HAVERSINE_METERS: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_METERS);

/// Distance in miles between two positions in degrees
pub fn distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    HAVERSINE_MILES.distance(Point::new(lng1, lat1), Point::new(lng2, lat2))
}

pub fn miles_between(a: Coordinate, b: Coordinate) -> f64 {
    HAVERSINE_MILES.distance(to_geo_point(&a), to_geo_point(&b))
}

/// Distance in meters between two coordinates
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    HAVERSINE_METERS.distance(to_geo_point(&a), to_geo_point(&b))
}
