//! Port trait definitions
//!
//! These traits define the interfaces that external collaborators must implement.

pub mod geocoding;

pub use geocoding::{GeocodeCandidate, Geocoder};
