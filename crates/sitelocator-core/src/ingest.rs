//! Station dataset ingestion
//!
//! The raw dataset is a JSON array of flat records. Loosely-typed values are
//! resolved here, once: card and feature flags become sets, coordinates become
//! floats, and surcharge values become trimmed strings. Records without a name
//! or usable coordinates never enter the working set.

use crate::error::{LocatorError, Result};
use crate::models::{Coordinate, Feature, FuelCard, Station, SurchargeCategory};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Stations loaded from a dataset plus a summary of what was dropped
#[derive(Debug, Clone)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub report: LoadReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub total_records: usize,
    pub loaded: usize,
    pub missing_name: usize,
    pub invalid_coordinates: usize,
    pub not_an_object: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.missing_name + self.invalid_coordinates + self.not_an_object
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    MissingName,
    InvalidCoordinates,
}

/// Load a dataset from a JSON file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LocatorError::DatasetNotFound { path: path.to_path_buf() });
    }

    let content = fs::read_to_string(path)?;
    let dataset = load_from_str(&content)?;

    tracing::info!(
        "Loaded {} stations from {} ({} skipped)",
        dataset.report.loaded,
        path.display(),
        dataset.report.skipped()
    );

    Ok(dataset)
}

/// Load a dataset from any reader producing JSON
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let value: Value = serde_json::from_reader(reader)?;
    parse_dataset(value)
}

/// Load a dataset from a JSON string
pub fn load_from_str(content: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(content)?;
    parse_dataset(value)
}

/// Convert a parsed JSON array of records into the working set
pub fn parse_dataset(value: Value) -> Result<Dataset> {
    let records = match value {
        Value::Array(records) => records,
        other => {
            return Err(LocatorError::InvalidDataset {
                reason: format!("expected an array of station records, found {}", kind(&other)),
            })
        }
    };

    let mut report = LoadReport { total_records: records.len(), ..Default::default() };
    let mut stations = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(record) = record.as_object() else {
            tracing::debug!("Skipping record {}: not an object", index);
            report.not_an_object += 1;
            continue;
        };

        match station_from_record(record) {
            Ok(station) => stations.push(station),
            Err(SkipReason::MissingName) => {
                tracing::debug!("Skipping record {}: missing name", index);
                report.missing_name += 1;
            }
            Err(SkipReason::InvalidCoordinates) => {
                tracing::debug!("Skipping record {}: missing or invalid coordinates", index);
                report.invalid_coordinates += 1;
            }
        }
    }

    report.loaded = stations.len();
    Ok(Dataset { stations, report })
}

fn station_from_record(record: &Map<String, Value>) -> std::result::Result<Station, SkipReason> {
    let name = text_field(record, "name").ok_or(SkipReason::MissingName)?;

    let lat = record.get("lat").and_then(coordinate_value);
    let lng = record.get("lng").and_then(coordinate_value);
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => return Err(SkipReason::InvalidCoordinates),
    };
    if !location.is_valid() {
        return Err(SkipReason::InvalidCoordinates);
    }

    let mut station = Station::new(name, location.lat, location.lng);
    station.address1 = text_field(record, "address1");
    station.address2 = text_field(record, "address2");
    station.city = text_field(record, "city");
    station.region = text_field(record, "region");
    station.zip = text_field(record, "zip");
    station.network = text_field(record, "network");

    station.cards = FuelCard::ALL
        .into_iter()
        .filter(|card| record.get(card.id()).is_some_and(is_truthy_flag))
        .collect();

    station.features = Feature::ALL
        .into_iter()
        .filter(|feature| record.get(feature.field()).is_some_and(is_truthy_flag))
        .collect();

    station.surcharges = SurchargeCategory::ALL
        .into_iter()
        .filter_map(|category| {
            record.get(category.field()).and_then(surcharge_text).map(|value| (category, value))
        })
        .collect();

    Ok(station)
}

/// Flag encoding used by the dataset: only `1`, `1.0`, and `"1"` are true
///
/// Other truthy-looking values (`true`, `"yes"`, `"1.0"`, `2`) are false.
pub fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "1",
        _ => false,
    }
}

/// Stringified, trimmed surcharge value, or `None` when the value is empty
/// or falsy (`null`, `false`, `0`, `""`)
pub fn surcharge_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => {
            let f = n.as_f64()?;
            if f == 0.0 || f.is_nan() {
                return None;
            }
            format_number(n)
        }
        Value::String(s) => s.trim().to_string(),
        Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Integral numbers are rendered without a fractional part (`2.0` → `"2"`)
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn coordinate_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match record.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => format_number(n),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
