//! Filter primitives over a station collection
//!
//! Every primitive takes the stations by reference and returns new values.
//! Nothing here writes to its input.

use sitelocator_core::models::{
    Coordinate, DrawnPath, Feature, FuelCard, PathDistance, Station, SurchargeCategory,
};
use sitelocator_geo::distance::miles_between;
use sitelocator_geo::spatial::any_path_contains;
use std::collections::BTreeSet;

/// Whether a station accepts a card
pub fn station_accepts_card(station: &Station, card: FuelCard) -> bool {
    station.accepts(card)
}

/// Keep stations accepting at least one of `cards`
///
/// An empty selection keeps everything.
pub fn filter_by_cards(stations: &[Station], cards: &[FuelCard]) -> Vec<Station> {
    if cards.is_empty() {
        return stations.to_vec();
    }

    stations
        .iter()
        .filter(|station| cards.iter().any(|card| station.accepts(*card)))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on name, first address line, city, or region
pub fn matches_search(station: &Station, term: &str) -> bool {
    let needle = term.to_lowercase();
    let fields = [
        Some(station.name.as_str()),
        station.address1.as_deref(),
        station.city.as_deref(),
        station.region.as_deref(),
    ];

    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep stations matching a search term; a blank term keeps everything
pub fn filter_by_search(stations: &[Station], term: &str) -> Vec<Station> {
    let term = term.trim();
    if term.is_empty() {
        return stations.to_vec();
    }

    stations.iter().filter(|station| matches_search(station, term)).cloned().collect()
}

pub fn filter_by_feature(stations: &[Station], feature: Feature) -> Vec<Station> {
    stations.iter().filter(|station| station.has_feature(feature)).cloned().collect()
}

/// Keep stations whose value for `category` is one of `values`
///
/// Stations with no value for the category never survive, so an empty
/// `values` set removes every station. Callers gate on the selection.
pub fn filter_by_surcharge(
    stations: &[Station],
    category: SurchargeCategory,
    values: &BTreeSet<String>,
) -> Vec<Station> {
    stations
        .iter()
        .filter(|station| {
            station.surcharge(category).is_some_and(|value| values.contains(value.trim()))
        })
        .cloned()
        .collect()
}

/// Distinct surcharge values seen for a category, sorted
pub fn surcharge_values_for(stations: &[Station], category: SurchargeCategory) -> Vec<String> {
    stations
        .iter()
        .filter_map(|station| station.surcharge(category))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Stations within `radius_miles` of `origin`, nearest first
///
/// Survivors are copies carrying their distance from `origin`; any
/// distance from an earlier search is overwritten.
pub fn filter_by_radius(stations: &[Station], origin: Coordinate, radius_miles: f64) -> Vec<Station> {
    let mut within: Vec<Station> = stations
        .iter()
        .filter(|station| station.location().is_valid())
        .filter_map(|station| {
            let miles = miles_between(origin, station.location());
            (miles <= radius_miles).then(|| station.with_distance(miles))
        })
        .collect();

    within.sort_by(|a, b| {
        let a = a.distance_miles.unwrap_or(f64::INFINITY);
        let b = b.distance_miles.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });

    within
}

/// Radius filter that is a no-op unless both origin and a positive radius are given
pub fn filter_by_optional_radius(
    stations: &[Station],
    origin: Option<Coordinate>,
    radius_miles: Option<f64>,
) -> Vec<Station> {
    match (origin, radius_miles) {
        (Some(origin), Some(radius)) if radius.is_finite() && radius > 0.0 => {
            filter_by_radius(stations, origin, radius)
        }
        _ => stations.to_vec(),
    }
}

/// Keep stations inside the buffer of at least one drawn path
pub fn filter_by_paths(stations: &[Station], paths: &[DrawnPath], mode: PathDistance) -> Vec<Station> {
    stations
        .iter()
        .filter(|station| {
            let location = station.location();
            location.is_valid() && any_path_contains(paths, location, mode)
        })
        .cloned()
        .collect()
}
