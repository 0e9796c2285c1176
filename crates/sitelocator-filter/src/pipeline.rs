use serde::Serialize;
use sitelocator_core::config::LayeredConfig;
use sitelocator_core::models::{DrawnPath, FilterState, FuelCard, PathDistance, Station};

use crate::filters::{
    filter_by_cards, filter_by_feature, filter_by_paths, filter_by_radius, filter_by_search,
    filter_by_surcharge,
};
use crate::must_have::cards_common_to_stations;

/// Per-surface pipeline contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineOptions {
    /// With no drawn path and no radius search, return nothing instead of
    /// every station
    pub require_location: bool,

    /// Cap applied after all filtering
    pub max_results: Option<usize>,

    pub path_distance: PathDistance,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            require_location: true,
            max_results: Some(100),
            path_distance: PathDistance::Endpoints,
        }
    }
}

impl PipelineOptions {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            require_location: config.require_location.value,
            max_results: config.result_limit(),
            path_distance: config.path_distance.value,
        }
    }

    pub fn with_require_location(mut self, require: bool) -> Self {
        self.require_location = require;
        self
    }

    pub fn with_max_results(mut self, max: Option<usize>) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_path_distance(mut self, mode: PathDistance) -> Self {
        self.path_distance = mode;
        self
    }
}

/// Which spatial restriction the first stage applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialMode {
    DrawnPaths,
    Radius,
    /// No spatial input; everything passed through
    Unrestricted,
    /// No spatial input and a location is required
    LocationRequired,
}

/// Survivor count after one pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: String,
    pub remaining: usize,
}

/// Pipeline output with an account of how it was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub stations: Vec<Station>,
    pub spatial: SpatialMode,
    /// Cards common to the must-have stations (`None` when none are pinned)
    pub must_have_cards: Option<Vec<FuelCard>>,
    pub stages: Vec<StageCount>,
    /// Survivors before the result cap
    pub total_matches: usize,
}

impl PipelineResult {
    pub fn truncated(&self) -> bool {
        self.stations.len() < self.total_matches
    }
}

/// Produce the visible stations for a filter state
///
/// Pure in `(stations, state, options)`: the input is never modified, and
/// equal inputs give equal output.
pub fn compute_filtered_stations(
    stations: &[Station],
    state: &FilterState,
    options: &PipelineOptions,
) -> Vec<Station> {
    FilterPipeline::new(*options).run(stations, state).stations
}

/// Fixed-order filter pipeline
///
/// Stages run in this order, each consuming the previous stage's output:
/// spatial (drawn paths, else radius), must-have cards, selected cards,
/// search text, features, surcharges, result cap.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    options: PipelineOptions,
}

impl FilterPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn run(&self, stations: &[Station], state: &FilterState) -> PipelineResult {
        let mut stages = Vec::new();
        let mut record = |stage: String, remaining: usize| {
            tracing::debug!(stage = %stage, remaining, "pipeline stage");
            stages.push(StageCount { stage, remaining });
        };

        // Stage 1: spatial restriction
        let (mut current, spatial) = self.spatial_stage(stations, state);
        record(format!("spatial:{}", spatial_label(spatial)), current.len());

        // Stage 2: must-have constraint, computed over the full station set
        let must_have_cards = cards_common_to_stations(stations, &state.must_have);
        if let Some(cards) = must_have_cards.as_deref().filter(|cards| !cards.is_empty()) {
            current = filter_by_cards(&current, cards);
            record("must_have".to_string(), current.len());
        }

        // Stage 3: explicit card selection, AND with stage 2
        if !state.selected_cards.is_empty() {
            current = filter_by_cards(&current, &state.selected_cards);
            record("cards".to_string(), current.len());
        }

        if !state.search_term.trim().is_empty() {
            current = filter_by_search(&current, &state.search_term);
            record("search".to_string(), current.len());
        }

        for feature in &state.features {
            current = filter_by_feature(&current, *feature);
            record(format!("feature:{}", feature.field()), current.len());
        }

        for (category, values) in state.surcharges.active() {
            current = filter_by_surcharge(&current, category, values);
            record(format!("surcharge:{}", category.field()), current.len());
        }

        let total_matches = current.len();
        if let Some(max) = self.options.max_results {
            if current.len() > max {
                current.truncate(max);
                record("cap".to_string(), current.len());
            }
        }

        PipelineResult { stations: current, spatial, must_have_cards, stages, total_matches }
    }

    fn spatial_stage(&self, stations: &[Station], state: &FilterState) -> (Vec<Station>, SpatialMode) {
        let paths: Vec<DrawnPath> = state.active_paths().cloned().collect();
        if !paths.is_empty() {
            let kept = filter_by_paths(stations, &paths, self.options.path_distance);
            return (kept, SpatialMode::DrawnPaths);
        }

        if let Some((origin, radius)) = state.radius_search() {
            return (filter_by_radius(stations, origin, radius), SpatialMode::Radius);
        }

        if self.options.require_location {
            (Vec::new(), SpatialMode::LocationRequired)
        } else {
            (stations.to_vec(), SpatialMode::Unrestricted)
        }
    }
}

fn spatial_label(mode: SpatialMode) -> &'static str {
    match mode {
        SpatialMode::DrawnPaths => "paths",
        SpatialMode::Radius => "radius",
        SpatialMode::Unrestricted => "none",
        SpatialMode::LocationRequired => "location_required",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitelocator_core::models::{Coordinate, Feature, SurchargeCategory};

    fn origin() -> Coordinate {
        Coordinate::new(51.5074, -0.1278)
    }

    fn dataset() -> Vec<Station> {
        vec![
            Station::new("Near UK Fuels", 51.52, -0.13)
                .with_cards([FuelCard::UkFuels, FuelCard::KeyFuels])
                .with_feature(Feature::Hgv)
                .with_surcharge(SurchargeCategory::UkFuels, "A"),
            Station::new("Near Esso", 51.50, -0.10)
                .with_cards([FuelCard::EssoFleet, FuelCard::KeyFuels])
                .with_address("Station Road", "London", "Greater London"),
            Station::new("Far UK Fuels", 53.48, -2.24)
                .with_card(FuelCard::UkFuels)
                .with_feature(Feature::Hgv),
        ]
    }

    fn unrestricted() -> PipelineOptions {
        PipelineOptions::default().with_require_location(false)
    }

    fn names(stations: &[Station]) -> Vec<&str> {
        stations.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_no_location_contract() {
        let state = FilterState::new();

        let strict = FilterPipeline::new(PipelineOptions::default()).run(&dataset(), &state);
        assert!(strict.stations.is_empty());
        assert_eq!(strict.spatial, SpatialMode::LocationRequired);

        let open = FilterPipeline::new(unrestricted()).run(&dataset(), &state);
        assert_eq!(open.stations.len(), 3);
        assert_eq!(open.spatial, SpatialMode::Unrestricted);
    }

    #[test]
    fn test_radius_then_card() {
        let state = FilterState::new()
            .with_origin(origin())
            .with_radius(5.0)
            .with_card(FuelCard::UkFuels);

        let result = compute_filtered_stations(&dataset(), &state, &PipelineOptions::default());
        assert_eq!(names(&result), vec!["Near UK Fuels"]);
        assert!(result[0].distance_miles.unwrap() < 5.0);
    }

    #[test]
    fn test_drawn_path_takes_precedence_over_radius() {
        let path = DrawnPath::new(
            vec![Coordinate::new(53.48, -2.24), Coordinate::new(53.40, -2.10)],
            Some(500.0),
        );
        let state = FilterState::new().with_origin(origin()).with_radius(5.0).with_path(path);

        let result = FilterPipeline::new(PipelineOptions::default()).run(&dataset(), &state);
        assert_eq!(result.spatial, SpatialMode::DrawnPaths);
        assert_eq!(names(&result.stations), vec!["Far UK Fuels"]);
        assert_eq!(result.stations[0].distance_miles, None);
    }

    #[test]
    fn test_degenerate_path_falls_back_to_radius() {
        let state = FilterState::new()
            .with_origin(origin())
            .with_radius(5.0)
            .with_path(DrawnPath::new(vec![Coordinate::new(53.48, -2.24)], None));

        let result = FilterPipeline::new(PipelineOptions::default()).run(&dataset(), &state);
        assert_eq!(result.spatial, SpatialMode::Radius);
        assert_eq!(result.stations.len(), 2);
    }

    #[test]
    fn test_must_have_and_selected_cards_are_sequential() {
        // must-have: stations 0 and 1 share only keyfuels
        let state = FilterState::new().with_must_have(0).with_must_have(1);
        let result = FilterPipeline::new(unrestricted()).run(&dataset(), &state);
        assert_eq!(result.must_have_cards, Some(vec![FuelCard::KeyFuels]));
        assert_eq!(names(&result.stations), vec!["Near UK Fuels", "Near Esso"]);

        // selecting esso-fleet on top narrows further instead of widening
        let state = state.with_card(FuelCard::EssoFleet);
        let result = FilterPipeline::new(unrestricted()).run(&dataset(), &state);
        assert_eq!(names(&result.stations), vec!["Near Esso"]);
    }

    #[test]
    fn test_must_have_with_no_common_cards_does_not_filter() {
        // stations 1 and 2 share nothing
        let state = FilterState::new().with_must_have(1).with_must_have(2);
        let result = FilterPipeline::new(unrestricted()).run(&dataset(), &state);
        assert_eq!(result.must_have_cards, Some(vec![]));
        assert_eq!(result.stations.len(), 3);
    }

    #[test]
    fn test_search_feature_and_surcharge_stages() {
        let options = unrestricted();

        let state = FilterState::new().with_search("greater london");
        assert_eq!(names(&compute_filtered_stations(&dataset(), &state, &options)), vec!["Near Esso"]);

        let state = FilterState::new().with_feature(Feature::Hgv);
        assert_eq!(compute_filtered_stations(&dataset(), &state, &options).len(), 2);

        let state = FilterState::new().with_surcharge(SurchargeCategory::UkFuels, "A");
        assert_eq!(
            names(&compute_filtered_stations(&dataset(), &state, &options)),
            vec!["Near UK Fuels"]
        );
    }

    #[test]
    fn test_result_cap() {
        let options = unrestricted().with_max_results(Some(2));
        let result = FilterPipeline::new(options).run(&dataset(), &FilterState::new());

        assert_eq!(result.stations.len(), 2);
        assert_eq!(result.total_matches, 3);
        assert!(result.truncated());
        assert_eq!(result.stages.last().map(|s| s.stage.as_str()), Some("cap"));
    }

    #[test]
    fn test_stage_counts_follow_order() {
        let state = FilterState::new()
            .with_origin(origin())
            .with_radius(5.0)
            .with_card(FuelCard::KeyFuels)
            .with_feature(Feature::Hgv);

        let result = FilterPipeline::new(PipelineOptions::default()).run(&dataset(), &state);
        let stages: Vec<_> = result.stages.iter().map(|s| (s.stage.as_str(), s.remaining)).collect();
        assert_eq!(stages, vec![("spatial:radius", 2), ("cards", 2), ("feature:hgv", 1)]);
    }

    #[test]
    fn test_options_from_config() {
        let config = LayeredConfig::with_defaults();
        let options = PipelineOptions::from_config(&config);
        assert_eq!(options, PipelineOptions::default());
    }
}
