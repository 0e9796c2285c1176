//! Configuration and dataset loading for CLI commands

use anyhow::{Context, Result};
use sitelocator_core::config::{CliConfigOverrides, LayeredConfig};
use sitelocator_core::ingest::{self, Dataset};
use std::path::Path;

use crate::cli::FilterArgs;

/// Load layered configuration: defaults, then the config file if given,
/// then the environment
pub fn load_config(config_path: Option<&Path>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    Ok(config.load_from_env())
}

/// Load layered configuration with the overrides given on the command line
pub fn load_config_with_overrides(
    config_path: Option<&Path>,
    filter: &FilterArgs,
) -> Result<LayeredConfig> {
    let mut config = load_config(config_path)?;
    config.update_from_cli(overrides_from(filter));
    Ok(config)
}

fn overrides_from(filter: &FilterArgs) -> CliConfigOverrides {
    CliConfigOverrides {
        radius_miles: filter.radius,
        max_results: filter.max_results,
        require_location: filter.no_require_location.then_some(false),
        buffer_meters: filter.buffer,
        path_distance: filter.path_distance,
    }
}

/// Load the station dataset named by `--dataset`
pub fn load_dataset(dataset_path: Option<&Path>) -> Result<Dataset> {
    let path = dataset_path
        .context("No dataset given. Pass --dataset <FILE> with a JSON array of stations")?;

    ingest::load_from_file(path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))
}
