use serde::Serialize;
use sitelocator_core::config::ConfigSource;
use sitelocator_core::models::{FuelCard, Station};
use sitelocator_filter::{
    ActiveFilterCounts, CardComparison, CardCoverage, SpatialMode, StageCount,
};
use tabled::Tabled;

/// Output for search command
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub dataset_size: usize,
    pub spatial: SpatialMode,
    pub total_matches: usize,
    pub returned: usize,
    pub truncated: bool,
    pub active_filters: ActiveFilterCounts,
    pub must_have_cards: Option<Vec<FuelCard>>,
    pub stages: Vec<StageCount>,
    pub stations: Vec<Station>,
}

#[derive(Debug, Tabled)]
pub struct StationRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Cards")]
    pub cards: String,
}

impl StationRow {
    pub fn new(rank: usize, station: &Station) -> Self {
        Self {
            rank,
            name: station.name.clone(),
            address: station.full_address(),
            distance: station
                .distance_miles
                .map(|miles| format!("{:.1} mi", miles))
                .unwrap_or_else(|| "-".to_string()),
            cards: station.accepted_cards().map(|card| card.id()).collect::<Vec<_>>().join(", "),
        }
    }
}

/// Output for surcharges command
#[derive(Debug, Serialize)]
pub struct SurchargesOutput {
    pub category: String,
    pub card: FuelCard,
    pub values: Vec<String>,
}

/// Output for coverage command
#[derive(Debug, Serialize)]
pub struct CoverageOutput {
    pub station_count: usize,
    pub must_have_cards: Option<Vec<FuelCard>>,
    pub coverage: Vec<CardCoverage>,
    pub top_cards: Vec<CardCoverage>,
}

#[derive(Debug, Tabled)]
pub struct CoverageRow {
    #[tabled(rename = "Card")]
    pub name: String,
    #[tabled(rename = "Stations")]
    pub count: usize,
    #[tabled(rename = "Coverage")]
    pub percentage: String,
}

impl From<&CardCoverage> for CoverageRow {
    fn from(coverage: &CardCoverage) -> Self {
        Self {
            name: coverage.name.clone(),
            count: coverage.count,
            percentage: format!("{:.1}%", coverage.percentage),
        }
    }
}

/// Output for compare command
#[derive(Debug, Serialize)]
pub struct CompareOutput {
    pub station_count: usize,
    #[serde(flatten)]
    pub comparison: CardComparison,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl ConfigEntry {
    pub fn new(key: String, value: String, source: ConfigSource) -> Self {
        Self { key, value, source: format!("{:?}", source) }
    }
}
