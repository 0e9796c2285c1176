pub mod filter;
pub mod geometry;
pub mod schema;
pub mod station;

pub use filter::{FilterState, SurchargeSelection};
pub use geometry::{Coordinate, DrawnPath, PathDistance, DEFAULT_BUFFER_METERS};
pub use schema::{Feature, FuelCard, SurchargeCategory};
pub use station::Station;
