use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::geometry::Coordinate;
use super::schema::{Feature, FuelCard, SurchargeCategory};

/// A fuel station in the working set
///
/// Card and feature flags are resolved to sets at ingestion time, so every
/// predicate is a plain set lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lng: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// Brand / network the station trades under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default)]
    pub cards: BTreeSet<FuelCard>,
    #[serde(default)]
    pub features: BTreeSet<Feature>,

    /// Trimmed, non-empty surcharge value per category
    #[serde(default)]
    pub surcharges: BTreeMap<SurchargeCategory, String>,

    /// Miles from the origin of the radius search that produced this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

impl Station {
    /// Create a station with no cards, features, surcharges, or address
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            address1: None,
            address2: None,
            city: None,
            region: None,
            zip: None,
            network: None,
            cards: BTreeSet::new(),
            features: BTreeSet::new(),
            surcharges: BTreeMap::new(),
            distance_miles: None,
        }
    }

    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn accepts(&self, card: FuelCard) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn surcharge(&self, category: SurchargeCategory) -> Option<&str> {
        self.surcharges.get(&category).map(String::as_str)
    }

    /// Accepted cards in schema order
    pub fn accepted_cards(&self) -> impl Iterator<Item = FuelCard> + '_ {
        self.cards.iter().copied()
    }

    /// Non-empty address parts joined with ", "
    pub fn full_address(&self) -> String {
        [&self.address1, &self.address2, &self.city, &self.region, &self.zip]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Copy of the station annotated with a distance
    pub fn with_distance(&self, miles: f64) -> Self {
        Self { distance_miles: Some(miles), ..self.clone() }
    }

    pub fn with_card(mut self, card: FuelCard) -> Self {
        self.cards.insert(card);
        self
    }

    pub fn with_cards(mut self, cards: impl IntoIterator<Item = FuelCard>) -> Self {
        self.cards.extend(cards);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn with_surcharge(mut self, category: SurchargeCategory, value: impl Into<String>) -> Self {
        self.surcharges.insert(category, value.into());
        self
    }

    pub fn with_address(
        mut self,
        address1: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.address1 = Some(address1.into());
        self.city = Some(city.into());
        self.region = Some(region.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address_skips_missing_parts() {
        let mut station = Station::new("Depot", 51.0, -1.0).with_address("1 High St", "Leeds", "");
        station.zip = Some("LS1 1AA".to_string());
        assert_eq!(station.full_address(), "1 High St, Leeds, LS1 1AA");

        let bare = Station::new("Bare", 51.0, -1.0);
        assert_eq!(bare.full_address(), "");
    }

    #[test]
    fn test_accepted_cards_in_schema_order() {
        let station = Station::new("Depot", 51.0, -1.0)
            .with_card(FuelCard::UkFuels)
            .with_card(FuelCard::EssoFleet)
            .with_card(FuelCard::KeyFuels);

        let cards: Vec<_> = station.accepted_cards().collect();
        assert_eq!(cards, vec![FuelCard::EssoFleet, FuelCard::KeyFuels, FuelCard::UkFuels]);
    }

    #[test]
    fn test_with_distance_leaves_original_untouched() {
        let station = Station::new("Depot", 51.0, -1.0);
        let annotated = station.with_distance(4.2);
        assert_eq!(annotated.distance_miles, Some(4.2));
        assert_eq!(station.distance_miles, None);
    }
}
