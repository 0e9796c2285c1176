//! Site Locator Geo - Distance and drawn-path geometry
//!
//! This crate holds the great-circle distance primitive, the buffered-path
//! membership test, and the corridor outline used to display drawn routes.

pub mod corridor;
pub mod distance;
pub mod models;
pub mod spatial;

pub use distance::{distance_meters, distance_miles, miles_between};
pub use spatial::{is_within_buffered_path, path_contains};
