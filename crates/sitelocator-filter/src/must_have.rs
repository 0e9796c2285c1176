//! Cards common to a pinned set of "must-have" stations

use sitelocator_core::models::{FuelCard, Station};

/// Cards accepted by every station at `indices`, in schema order
///
/// Returns `None` when no stations are pinned, and `Some(vec![])` when the
/// pinned stations share no card. Indices outside `stations` are skipped;
/// if none of them resolve the result is an empty list.
pub fn cards_common_to_stations(stations: &[Station], indices: &[usize]) -> Option<Vec<FuelCard>> {
    if indices.is_empty() {
        return None;
    }

    let pinned: Vec<&Station> = indices.iter().filter_map(|&i| stations.get(i)).collect();
    if pinned.is_empty() {
        return Some(Vec::new());
    }

    Some(
        FuelCard::ALL
            .into_iter()
            .filter(|card| pinned.iter().all(|station| station.accepts(*card)))
            .collect(),
    )
}
