//! Corridor command implementation

use crate::cli::CorridorArgs;
use crate::commands::{parse_paths, CommandContext};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use sitelocator_geo::corridor::corridor_feature_collection;

pub fn execute(args: CorridorArgs, ctx: &CommandContext, output: &OutputWriter) -> Result<()> {
    let config = load_config(ctx.config_path)?;
    let buffer = args.buffer.unwrap_or(config.buffer_meters.value);

    let paths = parse_paths(&args.paths, buffer)?;
    let inactive = paths.iter().filter(|path| !path.is_active()).count();
    if inactive > 0 {
        output.warning(format!("Skipping {} path(s) with fewer than two points", inactive));
    }

    let collection = corridor_feature_collection(&paths);

    if output.is_json() {
        output.result(collection)?;
    } else {
        // plain GeoJSON, ready to redirect into a file
        output.data(&collection)?;
    }

    Ok(())
}
