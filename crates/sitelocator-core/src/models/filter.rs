use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::geometry::{Coordinate, DrawnPath};
use super::schema::{Feature, FuelCard, SurchargeCategory};

/// Selected surcharge values, per category (OR within a category)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeSelection(BTreeMap<SurchargeCategory, BTreeSet<String>>);

impl SurchargeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to a category's selection; the value is trimmed
    pub fn select(&mut self, category: SurchargeCategory, value: impl AsRef<str>) {
        self.0.entry(category).or_default().insert(value.as_ref().trim().to_string());
    }

    /// Selected values for a category (empty when nothing is selected)
    pub fn values(&self, category: SurchargeCategory) -> Option<&BTreeSet<String>> {
        self.0.get(&category).filter(|values| !values.is_empty())
    }

    /// Categories with at least one selected value, in schema order
    pub fn active(&self) -> impl Iterator<Item = (SurchargeCategory, &BTreeSet<String>)> {
        self.0.iter().filter(|(_, values)| !values.is_empty()).map(|(c, v)| (*c, v))
    }

    /// Selected values summed across categories
    pub fn total(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// The set of currently active predicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Origin of the radius search (device location or geocoded query)
    pub origin: Option<Coordinate>,

    pub radius_miles: Option<f64>,

    /// Drawn routes; a station matching any active path is kept
    #[serde(default)]
    pub drawn_paths: Vec<DrawnPath>,

    /// Explicitly selected cards (OR)
    #[serde(default)]
    pub selected_cards: Vec<FuelCard>,

    #[serde(default)]
    pub search_term: String,

    /// Enabled feature toggles
    #[serde(default)]
    pub features: BTreeSet<Feature>,

    #[serde(default)]
    pub surcharges: SurchargeSelection,

    /// Indices into the full station set
    #[serde(default)]
    pub must_have: Vec<usize>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Coordinate) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_radius(mut self, miles: f64) -> Self {
        self.radius_miles = Some(miles);
        self
    }

    pub fn with_path(mut self, path: DrawnPath) -> Self {
        self.drawn_paths.push(path);
        self
    }

    pub fn with_card(mut self, card: FuelCard) -> Self {
        if !self.selected_cards.contains(&card) {
            self.selected_cards.push(card);
        }
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn with_surcharge(mut self, category: SurchargeCategory, value: impl AsRef<str>) -> Self {
        self.surcharges.select(category, value);
        self
    }

    pub fn with_must_have(mut self, index: usize) -> Self {
        if !self.must_have.contains(&index) {
            self.must_have.push(index);
        }
        self
    }

    /// Drawn paths with at least two points
    pub fn active_paths(&self) -> impl Iterator<Item = &DrawnPath> {
        self.drawn_paths.iter().filter(|path| path.is_active())
    }

    pub fn has_active_path(&self) -> bool {
        self.active_paths().next().is_some()
    }

    /// Origin and radius usable for a radius search
    pub fn radius_search(&self) -> Option<(Coordinate, f64)> {
        let origin = self.origin.filter(|o| o.lat.is_finite() && o.lng.is_finite())?;
        let radius = self.radius_miles.filter(|r| r.is_finite() && *r > 0.0)?;
        Some((origin, radius))
    }

    /// Any spatial input at all: an active path or a radius search
    pub fn has_location(&self) -> bool {
        self.has_active_path() || self.radius_search().is_some()
    }
}
