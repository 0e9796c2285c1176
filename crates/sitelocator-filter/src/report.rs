//! Card coverage, card comparison, and active filter counts

use serde::Serialize;
use sitelocator_core::models::{FilterState, FuelCard, Station};

/// Share of a station set accepting one card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardCoverage {
    pub card: FuelCard,
    pub name: String,
    pub count: usize,
    /// Percentage of the station set, one decimal place
    pub percentage: f64,
}

/// Coverage of each card over `stations`, highest percentage first
///
/// Only the cards in `restrict_to` are reported when it is non-empty.
/// Cards no station accepts are left out; ties keep schema order.
pub fn card_coverage(stations: &[Station], restrict_to: &[FuelCard]) -> Vec<CardCoverage> {
    if stations.is_empty() {
        return Vec::new();
    }

    let total = stations.len() as f64;
    let mut coverage: Vec<CardCoverage> = FuelCard::ALL
        .into_iter()
        .filter(|card| restrict_to.is_empty() || restrict_to.contains(card))
        .filter_map(|card| {
            let count = stations.iter().filter(|station| station.accepts(card)).count();
            (count > 0).then(|| CardCoverage {
                card,
                name: card.display_name(),
                count,
                percentage: round_one_decimal(count as f64 / total * 100.0),
            })
        })
        .collect();

    coverage.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    coverage
}

/// The `n` most accepted cards, most accepted first
pub fn top_cards(stations: &[Station], n: usize) -> Vec<CardCoverage> {
    let mut coverage = card_coverage(stations, &[]);
    coverage.sort_by(|a, b| b.count.cmp(&a.count));
    coverage.truncate(n);
    coverage
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// How two cards overlap across a station set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardComparison {
    pub selected: FuelCard,
    pub comparison: FuelCard,
    pub both: usize,
    pub selected_only: usize,
    pub comparison_only: usize,
    /// Stations taking the comparison card but not the selected one
    pub missing: Vec<Station>,
}

pub fn compare_cards(stations: &[Station], selected: FuelCard, comparison: FuelCard) -> CardComparison {
    let mut report = CardComparison {
        selected,
        comparison,
        both: 0,
        selected_only: 0,
        comparison_only: 0,
        missing: Vec::new(),
    };

    for station in stations {
        match (station.accepts(selected), station.accepts(comparison)) {
            (true, true) => report.both += 1,
            (true, false) => report.selected_only += 1,
            (false, true) => {
                report.comparison_only += 1;
                report.missing.push(station.clone());
            }
            (false, false) => {}
        }
    }

    report
}

/// Number of active selections per filter group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveFilterCounts {
    pub features: usize,
    pub fuel_cards: usize,
    pub surcharges: usize,
    pub must_have: usize,
    pub search: usize,
}

impl ActiveFilterCounts {
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            features: state.features.len(),
            fuel_cards: state.selected_cards.len(),
            surcharges: state.surcharges.total(),
            must_have: state.must_have.len(),
            search: usize::from(!state.search_term.trim().is_empty()),
        }
    }

    pub fn total(&self) -> usize {
        self.features + self.fuel_cards + self.surcharges + self.must_have + self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitelocator_core::models::{Feature, SurchargeCategory};

    fn stations() -> Vec<Station> {
        vec![
            Station::new("A", 51.0, 0.0).with_cards([FuelCard::UkFuels, FuelCard::KeyFuels]),
            Station::new("B", 51.0, 0.0).with_cards([FuelCard::UkFuels, FuelCard::ShellCrt]),
            Station::new("C", 51.0, 0.0).with_card(FuelCard::UkFuels),
        ]
    }

    #[test]
    fn test_coverage_sorted_and_rounded() {
        let coverage = card_coverage(&stations(), &[]);
        let rows: Vec<_> = coverage.iter().map(|c| (c.card, c.count, c.percentage)).collect();

        assert_eq!(
            rows,
            vec![
                (FuelCard::UkFuels, 3, 100.0),
                (FuelCard::KeyFuels, 1, 33.3),
                (FuelCard::ShellCrt, 1, 33.3),
            ]
        );
        assert_eq!(coverage[0].name, "Uk Fuels");
    }

    #[test]
    fn test_coverage_restricted_to_cards() {
        let coverage = card_coverage(&stations(), &[FuelCard::ShellCrt, FuelCard::EssoFleet]);
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].card, FuelCard::ShellCrt);
        assert_eq!(coverage[0].percentage, 33.3);
    }

    #[test]
    fn test_coverage_of_empty_set() {
        assert!(card_coverage(&[], &[]).is_empty());
    }

    #[test]
    fn test_top_cards() {
        let top = top_cards(&stations(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].card, FuelCard::UkFuels);
    }

    #[test]
    fn test_compare_cards() {
        let report = compare_cards(&stations(), FuelCard::KeyFuels, FuelCard::UkFuels);
        assert_eq!(report.both, 1);
        assert_eq!(report.selected_only, 0);
        assert_eq!(report.comparison_only, 2);
        let missing: Vec<_> = report.missing.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(missing, vec!["B", "C"]);
    }

    #[test]
    fn test_active_filter_counts() {
        let state = FilterState::new()
            .with_feature(Feature::Hgv)
            .with_card(FuelCard::UkFuels)
            .with_card(FuelCard::KeyFuels)
            .with_surcharge(SurchargeCategory::UkFuels, "A")
            .with_surcharge(SurchargeCategory::UkFuels, "B")
            .with_must_have(0)
            .with_search("  ");

        let counts = ActiveFilterCounts::from_state(&state);
        assert_eq!(
            counts,
            ActiveFilterCounts { features: 1, fuel_cards: 2, surcharges: 2, must_have: 1, search: 0 }
        );
        assert_eq!(counts.total(), 6);
    }
}
