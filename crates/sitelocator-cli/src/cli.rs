use clap::{Args, Parser, Subcommand};
use sitelocator_core::models::{FuelCard, PathDistance, SurchargeCategory};
use std::path::PathBuf;

/// Site Locator - Find fuel stations by location, route, and card acceptance
#[derive(Parser, Debug)]
#[command(name = "sitelocator")]
#[command(about = "Find fuel stations by location, route, and card acceptance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Station dataset (JSON array of station records)
    #[arg(long, global = true, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the filter pipeline and list matching stations
    Search(SearchArgs),

    /// List the selectable values of a surcharge category
    Surcharges(SurchargesArgs),

    /// Card coverage of the stations matching a search
    Coverage(CoverageArgs),

    /// Compare two cards across the stations matching a search
    Compare(CompareArgs),

    /// Print the corridor outline of drawn paths as GeoJSON
    Corridor(CorridorArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

/// Filter state and pipeline overrides shared by commands that run a search
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Latitude of the search origin
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the search origin
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Search radius in miles (defaults to the configured radius)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Drawn path as "lat,lng;lat,lng;..." (repeatable, matches any path)
    #[arg(long = "path", value_name = "POINTS", allow_hyphen_values = true)]
    pub paths: Vec<String>,

    /// Buffer around drawn paths in meters
    #[arg(long)]
    pub buffer: Option<f64>,

    /// How distance to a path segment is measured
    #[arg(long, value_name = "MODE")]
    pub path_distance: Option<PathDistance>,

    /// Fuel card the station must accept (repeatable, any of)
    #[arg(long = "card", value_name = "CARD")]
    pub cards: Vec<FuelCard>,

    /// Index of a must-have station in the dataset (repeatable)
    #[arg(long = "must-have", value_name = "INDEX")]
    pub must_have: Vec<usize>,

    /// Text matched against name, address, city, and region
    #[arg(long)]
    pub search: Option<String>,

    /// Only stations with HGV access
    #[arg(long)]
    pub hgv: bool,

    /// Only stations open 24/7
    #[arg(long = "open-24-7")]
    pub open_24_7: bool,

    /// Surcharge value as category=value (repeatable)
    #[arg(long = "surcharge", value_name = "CATEGORY=VALUE", value_parser = parse_surcharge)]
    pub surcharges: Vec<(SurchargeCategory, String)>,

    /// Maximum number of stations to return (0 for no limit)
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Return every station when no location or path is given
    #[arg(long)]
    pub no_require_location: bool,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Parser, Debug)]
pub struct SurchargesArgs {
    /// Surcharge category (field name or owning card id)
    pub category: SurchargeCategory,
}

#[derive(Parser, Debug)]
pub struct CoverageArgs {
    /// Number of cards in the top cards summary
    #[arg(long, default_value = "5")]
    pub top: usize,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Card the comparison is made against
    pub selected: FuelCard,

    /// Card compared with the selected card
    pub comparison: FuelCard,

    /// List the stations taking the comparison card but not the selected one
    #[arg(long)]
    pub list_missing: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Parser, Debug)]
pub struct CorridorArgs {
    /// Drawn path as "lat,lng;lat,lng;..." (repeatable)
    #[arg(long = "path", value_name = "POINTS", required = true, allow_hyphen_values = true)]
    pub paths: Vec<String>,

    /// Buffer around each path in meters
    #[arg(long)]
    pub buffer: Option<f64>,
}

fn parse_surcharge(s: &str) -> Result<(SurchargeCategory, String), String> {
    let (category, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=VALUE, got '{}'", s))?;

    let category: SurchargeCategory = category.parse().map_err(|e| format!("{}", e))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("empty surcharge value for {}", category));
    }

    Ok((category, value.to_string()))
}
