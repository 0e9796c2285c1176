//! Integration tests for dataset loading from disk

use sitelocator_core::ingest::{load_from_file, load_from_reader};
use sitelocator_core::models::{FuelCard, SurchargeCategory};
use sitelocator_core::LocatorError;
use std::io::Write;
use tempfile::NamedTempFile;

const DATASET: &str = r#"[
    {
        "name": "Leeds Services",
        "lat": "53.7997",
        "lng": "-1.5492",
        "address1": "Kirkstall Road",
        "city": "Leeds",
        "region": "West Yorkshire",
        "zip": "LS3 1JL",
        "network": "Shell",
        "uk-fuels": 1,
        "shell-crt": "1",
        "uk_fuels_surcharge": "B"
    },
    {
        "name": "Ghost Station",
        "lat": "",
        "lng": ""
    },
    {
        "name": "York Truck Stop",
        "lat": 53.9591,
        "lng": -1.0815,
        "keyfuels": 1.0,
        "hgv": 1,
        "keyfuels_surcharge": 3
    }
]"#;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", DATASET).unwrap();

    let dataset = load_from_file(file.path()).unwrap();

    assert_eq!(dataset.report.total_records, 3);
    assert_eq!(dataset.report.loaded, 2);
    assert_eq!(dataset.report.invalid_coordinates, 1);

    let leeds = &dataset.stations[0];
    assert_eq!(leeds.full_address(), "Kirkstall Road, Leeds, West Yorkshire, LS3 1JL");
    assert_eq!(leeds.network.as_deref(), Some("Shell"));
    assert!(leeds.accepts(FuelCard::UkFuels));
    assert!(leeds.accepts(FuelCard::ShellCrt));

    let york = &dataset.stations[1];
    assert!(york.accepts(FuelCard::KeyFuels));
    assert_eq!(york.surcharge(SurchargeCategory::KeyFuels), Some("3"));
}

#[test]
fn test_load_from_reader() {
    let dataset = load_from_reader(DATASET.as_bytes()).unwrap();
    assert_eq!(dataset.stations.len(), 2);
}

#[test]
fn test_missing_file() {
    let err = load_from_file("/nonexistent/stations.json").unwrap_err();
    assert!(matches!(err, LocatorError::DatasetNotFound { .. }));
}

#[test]
fn test_malformed_json() {
    let err = load_from_reader("[{".as_bytes()).unwrap_err();
    assert!(matches!(err, LocatorError::Serialization(_)));
}
