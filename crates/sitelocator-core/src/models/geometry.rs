//! Coordinate and drawn-path types used across all sitelocator crates.

use crate::error::{LocatorError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Buffer applied to a drawn path when none (or an invalid one) is given
pub const DEFAULT_BUFFER_METERS: f64 = 1000.0;

/// WGS 84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = LocatorError;

    /// Parse `"lat,lng"`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| LocatorError::InvalidCoordinate {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (lat, lng) = s.split_once(',').ok_or_else(|| invalid("expected 'lat,lng'"))?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid("latitude is not a number"))?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid("longitude is not a number"))?;

        let coordinate = Coordinate::new(lat, lng);
        if !coordinate.is_valid() {
            return Err(invalid("out of range"));
        }
        Ok(coordinate)
    }
}

/// How the distance from a station to a drawn-path segment is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathDistance {
    /// Nearer of the two segment endpoints (great-circle). Points near the
    /// middle of a long segment can fall outside the buffer.
    #[default]
    Endpoints,
    /// Perpendicular distance to the segment on a local equirectangular
    /// projection
    Segment,
}

impl FromStr for PathDistance {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "endpoints" | "endpoint" => Ok(PathDistance::Endpoints),
            "segment" | "perpendicular" => Ok(PathDistance::Segment),
            _ => Err(LocatorError::ConfigInvalid {
                key: "path_distance".to_string(),
                reason: format!("Invalid path distance mode: {}. Use endpoints or segment", s),
            }),
        }
    }
}

/// Freehand route with a buffer tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnPath {
    pub points: Vec<Coordinate>,
    pub buffer_meters: f64,
}

impl DrawnPath {
    /// Create a drawn path; a missing, non-finite, or non-positive buffer
    /// falls back to [`DEFAULT_BUFFER_METERS`]
    pub fn new(points: Vec<Coordinate>, buffer_meters: Option<f64>) -> Self {
        let buffer_meters = match buffer_meters {
            Some(b) if b.is_finite() && b > 0.0 => b,
            _ => DEFAULT_BUFFER_METERS,
        };
        Self { points, buffer_meters }
    }

    /// A path with fewer than two points never matches anything
    pub fn is_active(&self) -> bool {
        self.points.len() >= 2
    }

    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Parse `"lat,lng;lat,lng;..."`
    pub fn parse_points(s: &str) -> Result<Vec<Coordinate>> {
        s.split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}
