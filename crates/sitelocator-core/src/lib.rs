//! Site Locator Core - Domain models, dataset ingestion, and configuration
//!
//! This crate contains the station schema, the filter state consumed by the
//! filtering pipeline, and the port definitions for external collaborators.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod ports;

pub use error::{LocatorError, Result};
