use crate::distance::{distance_meters, EARTH_RADIUS_METERS};
use crate::models::{Coordinate, DrawnPath, PathDistance};

/// Distance in meters from a point to one segment of a drawn path
///
/// `Endpoints` takes the nearer of the two endpoints by great-circle
/// distance, so the interior of a long segment is not covered.
/// `Segment` measures to the closest point on the segment after projecting
/// onto a local equirectangular plane centred on the point.
pub fn distance_to_segment(
    point: Coordinate,
    start: Coordinate,
    end: Coordinate,
    mode: PathDistance,
) -> f64 {
    match mode {
        PathDistance::Endpoints => {
            distance_meters(point, start).min(distance_meters(point, end))
        }
        PathDistance::Segment => projected_segment_distance(point, start, end),
    }
}

fn projected_segment_distance(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let cos_lat = point.lat.to_radians().cos();
    let project = |c: Coordinate| {
        let x = (c.lng - point.lng).to_radians() * cos_lat * EARTH_RADIUS_METERS;
        let y = (c.lat - point.lat).to_radians() * EARTH_RADIUS_METERS;
        (x, y)
    };

    // the point sits at the origin of the plane
    let (ax, ay) = project(start);
    let (bx, by) = project(end);
    let (dx, dy) = (bx - ax, by - ay);

    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (-(ax * dx + ay * dy) / length_sq).clamp(0.0, 1.0)
    };

    (ax + t * dx).hypot(ay + t * dy)
}

/// Check if a point lies within `buffer_meters` of any segment of a polyline,
/// using the endpoint approximation
///
/// A polyline with fewer than two points never matches.
pub fn is_within_buffered_path(point: Coordinate, path: &[Coordinate], buffer_meters: f64) -> bool {
    is_within_buffered_path_with(point, path, buffer_meters, PathDistance::Endpoints)
}

/// [`is_within_buffered_path`] with an explicit segment distance mode
pub fn is_within_buffered_path_with(
    point: Coordinate,
    path: &[Coordinate],
    buffer_meters: f64,
    mode: PathDistance,
) -> bool {
    if path.len() < 2 {
        return false;
    }

    path.windows(2)
        .any(|pair| distance_to_segment(point, pair[0], pair[1], mode) <= buffer_meters)
}

/// Check if a point lies inside a drawn path's buffer
pub fn path_contains(path: &DrawnPath, point: Coordinate, mode: PathDistance) -> bool {
    path.segments()
        .any(|(start, end)| distance_to_segment(point, start, end, mode) <= path.buffer_meters)
}

/// Check if a point lies inside the buffer of at least one path
pub fn any_path_contains<'a, I>(paths: I, point: Coordinate, mode: PathDistance) -> bool
where
    I: IntoIterator<Item = &'a DrawnPath>,
{
    paths.into_iter().any(|path| path_contains(path, point, mode))
}
