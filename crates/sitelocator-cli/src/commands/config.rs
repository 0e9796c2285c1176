//! Config command implementation

use crate::commands::CommandContext;
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;

pub fn execute(ctx: &CommandContext, output: &OutputWriter) -> Result<()> {
    let config = load_config(ctx.config_path)?;

    let values: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry::new(key, value, source))
        .collect();

    if output.is_json() {
        output.result(ConfigOutput { values })?;
    } else {
        output.section("Configuration");
        output.table(values);
    }

    Ok(())
}
