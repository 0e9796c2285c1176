//! Compare command implementation

use crate::cli::CompareArgs;
use crate::commands::{run_search, CommandContext};
use crate::output::OutputWriter;
use crate::output_types::{CompareOutput, StationRow};
use anyhow::Result;
use sitelocator_filter::compare_cards;

pub fn execute(args: CompareArgs, ctx: &CommandContext, output: &OutputWriter) -> Result<()> {
    let run = run_search(ctx, &args.filter, output)?;
    let stations = &run.result.stations;
    let comparison = compare_cards(stations, args.selected, args.comparison);

    if output.is_json() {
        output.result(CompareOutput { station_count: stations.len(), comparison })?;
        return Ok(());
    }

    let selected = args.selected.display_name();
    let other = args.comparison.display_name();

    output.section(format!("{} vs {}", selected, other));
    output.kv("Stations", stations.len());
    output.kv("Both cards", comparison.both);
    output.kv(format!("{} only", selected), comparison.selected_only);
    output.kv(format!("{} only", other), comparison.comparison_only);

    if args.list_missing {
        output.section(format!("Stations taking {} but not {}", other, selected));
        output.table(
            comparison
                .missing
                .iter()
                .enumerate()
                .map(|(i, station)| StationRow::new(i + 1, station))
                .collect(),
        );
    }

    Ok(())
}
