//! Static station schema shared by every component that enumerates cards,
//! features, or surcharge categories.
//!
//! The field names match the column names of the station dataset. The lists
//! are closed: nothing here is derived from the data.

use crate::error::{LocatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fuel card (payment scheme) a station may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelCard {
    #[serde(rename = "esso-fleet")]
    EssoFleet,
    #[serde(rename = "esso-maxx")]
    EssoMaxx,
    #[serde(rename = "fastfuels")]
    FastFuels,
    #[serde(rename = "fuelgenie")]
    FuelGenie,
    #[serde(rename = "keyfuels")]
    KeyFuels,
    #[serde(rename = "shell-crt")]
    ShellCrt,
    #[serde(rename = "shell-fleet")]
    ShellFleet,
    #[serde(rename = "uk-fuels")]
    UkFuels,
    #[serde(rename = "shell-crt-ev")]
    ShellCrtEv,
    #[serde(rename = "shell-fleet-ev")]
    ShellFleetEv,
    #[serde(rename = "shell-adblue-sites")]
    ShellAdblueSites,
    #[serde(rename = "maxx-control-pre-pay")]
    MaxxControlPrePay,
}

impl FuelCard {
    /// Every recognised card, in dataset column order
    pub const ALL: [FuelCard; 12] = [
        FuelCard::EssoFleet,
        FuelCard::EssoMaxx,
        FuelCard::FastFuels,
        FuelCard::FuelGenie,
        FuelCard::KeyFuels,
        FuelCard::ShellCrt,
        FuelCard::ShellFleet,
        FuelCard::UkFuels,
        FuelCard::ShellCrtEv,
        FuelCard::ShellFleetEv,
        FuelCard::ShellAdblueSites,
        FuelCard::MaxxControlPrePay,
    ];

    /// Dataset field name / identifier of the card
    pub fn id(&self) -> &'static str {
        match self {
            FuelCard::EssoFleet => "esso-fleet",
            FuelCard::EssoMaxx => "esso-maxx",
            FuelCard::FastFuels => "fastfuels",
            FuelCard::FuelGenie => "fuelgenie",
            FuelCard::KeyFuels => "keyfuels",
            FuelCard::ShellCrt => "shell-crt",
            FuelCard::ShellFleet => "shell-fleet",
            FuelCard::UkFuels => "uk-fuels",
            FuelCard::ShellCrtEv => "shell-crt-ev",
            FuelCard::ShellFleetEv => "shell-fleet-ev",
            FuelCard::ShellAdblueSites => "shell-adblue-sites",
            FuelCard::MaxxControlPrePay => "maxx-control-pre-pay",
        }
    }

    /// Human-readable name: each dash-separated word capitalised
    ///
    /// `uk-fuels` becomes `Uk Fuels`.
    pub fn display_name(&self) -> String {
        self.id()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FuelCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FuelCard {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        FuelCard::ALL
            .into_iter()
            .find(|card| card.id() == needle)
            .ok_or_else(|| LocatorError::UnknownFuelCard { id: s.to_string() })
    }
}

/// Boolean station amenity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Heavy-goods-vehicle access
    #[serde(rename = "hgv")]
    Hgv,
    /// Open around the clock
    #[serde(rename = "24-7")]
    TwentyFourSeven,
}

impl Feature {
    pub const ALL: [Feature; 2] = [Feature::Hgv, Feature::TwentyFourSeven];

    /// Dataset field name of the feature
    pub fn field(&self) -> &'static str {
        match self {
            Feature::Hgv => "hgv",
            Feature::TwentyFourSeven => "24-7",
        }
    }

    /// Human-readable name of the feature
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Hgv => "HGV Access",
            Feature::TwentyFourSeven => "24/7 Open",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for Feature {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hgv" => Ok(Feature::Hgv),
            "24-7" | "24/7" | "24_7" => Ok(Feature::TwentyFourSeven),
            _ => Err(LocatorError::UnknownFeature { id: s.to_string() }),
        }
    }
}

/// Per-card surcharge column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SurchargeCategory {
    #[serde(rename = "uk_fuels_surcharge")]
    UkFuels,
    #[serde(rename = "keyfuels_surcharge")]
    KeyFuels,
    #[serde(rename = "fastfuels_surcharge")]
    FastFuels,
    #[serde(rename = "shell_crt_core_non_core")]
    ShellCrt,
}

impl SurchargeCategory {
    pub const ALL: [SurchargeCategory; 4] = [
        SurchargeCategory::UkFuels,
        SurchargeCategory::KeyFuels,
        SurchargeCategory::FastFuels,
        SurchargeCategory::ShellCrt,
    ];

    /// Dataset field name of the surcharge column
    pub fn field(&self) -> &'static str {
        match self {
            SurchargeCategory::UkFuels => "uk_fuels_surcharge",
            SurchargeCategory::KeyFuels => "keyfuels_surcharge",
            SurchargeCategory::FastFuels => "fastfuels_surcharge",
            SurchargeCategory::ShellCrt => "shell_crt_core_non_core",
        }
    }

    /// The fuel card the surcharge column belongs to
    pub fn card(&self) -> FuelCard {
        match self {
            SurchargeCategory::UkFuels => FuelCard::UkFuels,
            SurchargeCategory::KeyFuels => FuelCard::KeyFuels,
            SurchargeCategory::FastFuels => FuelCard::FastFuels,
            SurchargeCategory::ShellCrt => FuelCard::ShellCrt,
        }
    }
}

impl fmt::Display for SurchargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for SurchargeCategory {
    type Err = LocatorError;

    /// Accepts the dataset field name or the owning card's identifier
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        SurchargeCategory::ALL
            .into_iter()
            .find(|category| category.field() == needle || category.card().id() == needle)
            .ok_or_else(|| LocatorError::UnknownSurchargeCategory { id: s.to_string() })
    }
}
