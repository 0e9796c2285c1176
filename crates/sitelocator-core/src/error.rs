//! Error types for the site locator

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    // Dataset errors
    #[error("Dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    // Schema lookups from user input
    #[error("Unknown fuel card: {id}")]
    UnknownFuelCard { id: String },

    #[error("Unknown feature: {id}")]
    UnknownFeature { id: String },

    #[error("Unknown surcharge category: {id}")]
    UnknownSurchargeCategory { id: String },

    #[error("Invalid coordinate {value}: {reason}")]
    InvalidCoordinate { value: String, reason: String },

    // Geocoding collaborator errors
    #[error("Geocoding failed: {reason}")]
    Geocoding { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LocatorError {
    fn from(err: serde_json::Error) -> Self {
        LocatorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
