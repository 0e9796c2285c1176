//! Search command implementation

use crate::cli::SearchArgs;
use crate::commands::{run_search, CommandContext};
use crate::output::OutputWriter;
use crate::output_types::{SearchOutput, StationRow};
use anyhow::Result;
use sitelocator_filter::ActiveFilterCounts;

pub fn execute(args: SearchArgs, ctx: &CommandContext, output: &OutputWriter) -> Result<()> {
    let run = run_search(ctx, &args.filter, output)?;
    let result = run.result;
    let active_filters = ActiveFilterCounts::from_state(&run.state);

    if output.is_json() {
        let truncated = result.truncated();
        output.result(SearchOutput {
            dataset_size: run.dataset_size,
            spatial: result.spatial,
            total_matches: result.total_matches,
            returned: result.stations.len(),
            truncated,
            active_filters,
            must_have_cards: result.must_have_cards,
            stages: result.stages,
            stations: result.stations,
        })?;
        return Ok(());
    }

    output.section("Stations");
    let rows: Vec<StationRow> = result
        .stations
        .iter()
        .enumerate()
        .map(|(i, station)| StationRow::new(i + 1, station))
        .collect();
    output.table(rows);

    if result.truncated() {
        output.info(format!(
            "Showing {} of {} matching stations",
            result.stations.len(),
            result.total_matches
        ));
    } else {
        output.kv("Matches", format!("{} of {} stations", result.total_matches, run.dataset_size));
    }

    if active_filters.total() > 0 {
        output.kv("Active filters", active_filters.total());
    }

    if !run.state.features.is_empty() {
        let labels: Vec<&str> = run.state.features.iter().map(|feature| feature.label()).collect();
        output.kv("Features", labels.join(", "));
    }

    if let Some(cards) = &result.must_have_cards {
        let names: Vec<String> = cards.iter().map(|card| card.display_name()).collect();
        output.kv(
            "Cards common to must-have stations",
            if names.is_empty() { "none".to_string() } else { names.join(", ") },
        );
    }

    Ok(())
}
