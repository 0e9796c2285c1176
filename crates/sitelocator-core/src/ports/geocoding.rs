//! Geocoding collaborator port
//!
//! The filtering core only ever consumes a resolved [`Coordinate`]. Network
//! lookups live behind [`Geocoder`]; failures surface as
//! [`LocatorError::Geocoding`] at this boundary and never inside the filters.

use crate::error::{LocatorError, Result};
use crate::models::Coordinate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Queries shorter than this (after trimming) are not looked up
pub const MIN_QUERY_LEN: usize = 3;

/// Most candidates returned from a search
pub const MAX_CANDIDATES: usize = 10;

/// A place returned by a forward geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub display_name: String,
    pub location: Coordinate,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub importance: f64,
}

/// Port for forward geocoding of free-text locations
pub trait Geocoder {
    /// Resolve a free-text query to candidate places, in provider order
    fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>>;
}

static UK_POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9]{1,2}[A-Z]?\s?[0-9][A-Z]{2}$").expect("valid postcode regex")
});

/// Whether a query looks like a UK postcode (`SW1A 1AA`, `M1 1AA`, `B338TH`)
pub fn is_uk_postcode(query: &str) -> bool {
    UK_POSTCODE_RE.is_match(query.trim())
}

/// Candidate postcode equals the query, or shares its outward code
pub fn has_matching_postcode(candidate: &GeocodeCandidate, query: &str) -> bool {
    let normalized = query.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    let Some(postcode) = candidate.postcode.as_deref().map(str::to_uppercase) else {
        return false;
    };

    let outward = normalized.split(' ').next().unwrap_or_default();
    postcode == normalized || postcode.starts_with(outward)
}

/// Order candidates by importance (highest first), keeping at most
/// [`MAX_CANDIDATES`]
///
/// Candidates with a matching postcode come first, so a partial query such
/// as `SW1A` prefers places in that outward code.
pub fn rank_candidates(query: &str, candidates: Vec<GeocodeCandidate>) -> Vec<GeocodeCandidate> {
    let mut ranked: Vec<(bool, GeocodeCandidate)> = candidates
        .into_iter()
        .map(|candidate| {
            let matches = has_matching_postcode(&candidate, query);
            (matches, candidate)
        })
        .collect();

    ranked.sort_by(|(a_match, a), (b_match, b)| {
        b_match.cmp(a_match).then_with(|| b.importance.total_cmp(&a.importance))
    });

    ranked.into_iter().map(|(_, candidate)| candidate).take(MAX_CANDIDATES).collect()
}

/// Look a query up through a geocoder and rank the results
///
/// Short queries return no candidates without calling the geocoder.
pub fn search_location<G: Geocoder + ?Sized>(
    geocoder: &G,
    query: &str,
) -> Result<Vec<GeocodeCandidate>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    tracing::debug!(query, postcode = is_uk_postcode(query), "geocoding location");
    let candidates = geocoder.search(query).map_err(|e| match e {
        LocatorError::Geocoding { .. } => e,
        other => LocatorError::Geocoding { reason: other.to_string() },
    })?;

    Ok(rank_candidates(query, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn candidate(name: &str, postcode: Option<&str>, importance: f64) -> GeocodeCandidate {
        GeocodeCandidate {
            display_name: name.to_string(),
            location: Coordinate::new(51.5, -0.1),
            postcode: postcode.map(str::to_string),
            importance,
        }
    }

    struct CountingGeocoder {
        calls: Cell<usize>,
        results: Vec<GeocodeCandidate>,
    }

    impl Geocoder for CountingGeocoder {
        fn search(&self, _query: &str) -> Result<Vec<GeocodeCandidate>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.results.clone())
        }
    }

    struct FailingGeocoder;

    impl Geocoder for FailingGeocoder {
        fn search(&self, _query: &str) -> Result<Vec<GeocodeCandidate>> {
            Err(LocatorError::ConfigMissing { key: "api_key".to_string() })
        }
    }

    #[test]
    fn test_uk_postcode_detection() {
        assert!(is_uk_postcode("SW1A 1AA"));
        assert!(is_uk_postcode("m1 1aa"));
        assert!(is_uk_postcode(" B338TH "));
        assert!(!is_uk_postcode("Manchester"));
        assert!(!is_uk_postcode("12345"));
    }

    #[test]
    fn test_postcode_matches_rank_first() {
        let ranked = rank_candidates(
            "SW1A 1AA",
            vec![
                candidate("Important", None, 0.9),
                candidate("Outward match", Some("SW1A 2BB"), 0.1),
                candidate("Exact", Some("sw1a 1aa"), 0.2),
            ],
        );

        let names: Vec<_> = ranked.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["Exact", "Outward match", "Important"]);
    }

    #[test]
    fn test_partial_postcode_prefers_outward_code_match() {
        let ranked = rank_candidates(
            "sw1a",
            vec![
                candidate("Important", None, 0.9),
                candidate("Other district", Some("SE1 7PB"), 0.8),
                candidate("Outward match", Some("SW1A 2BB"), 0.1),
            ],
        );

        let names: Vec<_> = ranked.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["Outward match", "Important", "Other district"]);
    }

    #[test]
    fn test_ranking_truncates() {
        let many = (0..15).map(|i| candidate(&format!("c{i}"), None, i as f64)).collect();
        let ranked = rank_candidates("Leeds", many);
        assert_eq!(ranked.len(), MAX_CANDIDATES);
        assert_eq!(ranked[0].display_name, "c14");
    }

    #[test]
    fn test_short_query_skips_lookup() {
        let geocoder = CountingGeocoder { calls: Cell::new(0), results: vec![] };
        assert!(search_location(&geocoder, " ab ").unwrap().is_empty());
        assert_eq!(geocoder.calls.get(), 0);

        search_location(&geocoder, "Leeds").unwrap();
        assert_eq!(geocoder.calls.get(), 1);
    }

    #[test]
    fn test_collaborator_failure_surfaces_as_geocoding_error() {
        let err = search_location(&FailingGeocoder, "Leeds").unwrap_err();
        assert!(matches!(err, LocatorError::Geocoding { .. }));
    }
}
