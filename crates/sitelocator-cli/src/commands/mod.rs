//! Command implementations

mod compare;
mod config;
mod corridor;
mod coverage;
mod search;
mod surcharges;

use crate::cli::{Cli, Commands, FilterArgs};
use crate::config_loader::{load_config_with_overrides, load_dataset};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use sitelocator_core::config::LayeredConfig;
use sitelocator_core::models::{Coordinate, DrawnPath, Feature, FilterState};
use sitelocator_filter::{FilterPipeline, PipelineOptions, PipelineResult, SpatialMode};
use std::path::Path;

/// Paths given on the command line, shared by every command
pub struct CommandContext<'a> {
    pub config_path: Option<&'a Path>,
    pub dataset_path: Option<&'a Path>,
}

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let ctx = CommandContext {
        config_path: cli.config.as_deref(),
        dataset_path: cli.dataset.as_deref(),
    };

    match cli.command {
        Commands::Search(args) => search::execute(args, &ctx, &output),
        Commands::Surcharges(args) => surcharges::execute(args, &ctx, &output),
        Commands::Coverage(args) => coverage::execute(args, &ctx, &output),
        Commands::Compare(args) => compare::execute(args, &ctx, &output),
        Commands::Corridor(args) => corridor::execute(args, &ctx, &output),
        Commands::Config => config::execute(&ctx, &output),
    }
}

/// The pipeline run over a loaded dataset
pub struct SearchRun {
    pub dataset_size: usize,
    pub state: FilterState,
    pub result: PipelineResult,
}

/// Load config and dataset, build the filter state, and run the pipeline
pub fn run_search(
    ctx: &CommandContext,
    filter: &FilterArgs,
    output: &OutputWriter,
) -> Result<SearchRun> {
    let config = load_config_with_overrides(ctx.config_path, filter)?;
    tracing::debug!(config = ?config.to_inspection_map(), "effective configuration");
    let dataset = load_dataset(ctx.dataset_path)?;

    if dataset.report.skipped() > 0 {
        output.warning(format!(
            "Skipped {} of {} records without a name or valid coordinates",
            dataset.report.skipped(),
            dataset.report.total_records
        ));
    }

    let state = build_filter_state(filter, &config)?;
    let pipeline = FilterPipeline::new(PipelineOptions::from_config(&config));
    let result = pipeline.run(&dataset.stations, &state);

    if result.spatial == SpatialMode::LocationRequired {
        output.warning(
            "No location or path given. Pass --lat/--lng, --path, or --no-require-location",
        );
    }

    for index in &state.must_have {
        if *index >= dataset.stations.len() {
            output.warning(format!("Must-have station {} is not in the dataset, ignoring it", index));
        }
    }

    Ok(SearchRun { dataset_size: dataset.stations.len(), state, result })
}

/// Translate command-line filters into a filter state
///
/// Radius and buffer fall back to the configured values.
pub fn build_filter_state(filter: &FilterArgs, config: &LayeredConfig) -> Result<FilterState> {
    let mut state = FilterState::new();

    if let (Some(lat), Some(lng)) = (filter.lat, filter.lng) {
        let origin = Coordinate::new(lat, lng);
        if !origin.is_valid() {
            anyhow::bail!("Origin {},{} is out of range", lat, lng);
        }
        state = state.with_origin(origin).with_radius(config.radius_miles.value);
    }

    for path in parse_paths(&filter.paths, config.buffer_meters.value)? {
        state = state.with_path(path);
    }

    for card in &filter.cards {
        state = state.with_card(*card);
    }

    for index in &filter.must_have {
        state = state.with_must_have(*index);
    }

    if let Some(term) = &filter.search {
        state = state.with_search(term.clone());
    }

    if filter.hgv {
        state = state.with_feature(Feature::Hgv);
    }
    if filter.open_24_7 {
        state = state.with_feature(Feature::TwentyFourSeven);
    }

    for (category, value) in &filter.surcharges {
        state = state.with_surcharge(*category, value);
    }

    Ok(state)
}

/// Parse `--path` values into drawn paths with a common buffer
pub fn parse_paths(raw: &[String], buffer_meters: f64) -> Result<Vec<DrawnPath>> {
    raw.iter()
        .map(|points| -> Result<DrawnPath> {
            let points = DrawnPath::parse_points(points)
                .with_context(|| format!("Invalid path '{}'", points))?;
            Ok(DrawnPath::new(points, Some(buffer_meters)))
        })
        .collect()
}
