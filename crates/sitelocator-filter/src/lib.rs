//! Site Locator Filter - Station filtering pipeline and reporting
//!
//! This crate implements the filter primitives, the must-have card
//! intersection, the fixed-order pipeline that composes them, and the
//! coverage reports run over its output.

pub mod filters;
pub mod must_have;
pub mod pipeline;
pub mod report;

pub use filters::{
    filter_by_cards, filter_by_feature, filter_by_optional_radius, filter_by_paths, filter_by_radius,
    filter_by_search, filter_by_surcharge, station_accepts_card, surcharge_values_for,
};
pub use must_have::cards_common_to_stations;
pub use pipeline::{
    compute_filtered_stations, FilterPipeline, PipelineOptions, PipelineResult, SpatialMode,
    StageCount,
};
pub use report::{
    card_coverage, compare_cards, top_cards, ActiveFilterCounts, CardComparison, CardCoverage,
};
