//! Surcharges command implementation

use crate::cli::SurchargesArgs;
use crate::commands::CommandContext;
use crate::config_loader::load_dataset;
use crate::output::OutputWriter;
use crate::output_types::SurchargesOutput;
use anyhow::Result;
use sitelocator_filter::surcharge_values_for;

pub fn execute(args: SurchargesArgs, ctx: &CommandContext, output: &OutputWriter) -> Result<()> {
    let dataset = load_dataset(ctx.dataset_path)?;
    let values = surcharge_values_for(&dataset.stations, args.category);

    if output.is_json() {
        output.result(SurchargesOutput {
            category: args.category.field().to_string(),
            card: args.category.card(),
            values,
        })?;
        return Ok(());
    }

    output.section(format!("{} surcharges", args.category.card().display_name()));
    if values.is_empty() {
        output.info("No stations carry a value for this surcharge");
    }
    for value in &values {
        println!("  {}", value);
    }

    Ok(())
}
