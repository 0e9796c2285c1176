//! Coverage command implementation

use crate::cli::CoverageArgs;
use crate::commands::{run_search, CommandContext};
use crate::output::OutputWriter;
use crate::output_types::{CoverageOutput, CoverageRow};
use anyhow::Result;
use sitelocator_filter::{card_coverage, top_cards};

pub fn execute(args: CoverageArgs, ctx: &CommandContext, output: &OutputWriter) -> Result<()> {
    let run = run_search(ctx, &args.filter, output)?;
    let stations = &run.result.stations;

    // a must-have selection narrows the report to the cards it has in common
    let restrict_to = run.result.must_have_cards.clone().unwrap_or_default();
    let coverage = card_coverage(stations, &restrict_to);
    let top = top_cards(stations, args.top);

    if output.is_json() {
        output.result(CoverageOutput {
            station_count: stations.len(),
            must_have_cards: run.result.must_have_cards,
            coverage,
            top_cards: top,
        })?;
        return Ok(());
    }

    output.section("Card Coverage");
    output.kv("Stations", stations.len());
    output.table(coverage.iter().map(CoverageRow::from).collect());

    output.section(format!("Top {} Cards", args.top));
    output.table(top.iter().map(CoverageRow::from).collect());

    Ok(())
}
