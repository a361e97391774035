use crate::utils::error::PrepError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A located earthquake from a hypocenter catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypocenter {
    pub time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: f64,
    pub magnitude: f64,
}

/// One eruptive episode from an eruption catalogue. Onsets are dated to the
/// day; the clock time of the outbreak is not recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eruption {
    pub number: u32,
    pub onset: NaiveDateTime,
    pub length_hours: f64,
    pub repose_days: f64,
    pub flow_area_km2: f64,
    pub flow_volume_km3: f64,
    pub effusion_rate: f64,
    pub location: String,
}

/// Recognized hypocenter CSV layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HypocenterFormat {
    /// USGS event export: `time,latitude,longitude,depth,mag`
    Usgs,
    /// WOVOdat export: `Date-time,Latitude,Longitude,Depth,Magnitude`
    Wovodat,
}

impl Default for HypocenterFormat {
    fn default() -> Self {
        Self::Usgs
    }
}

impl FromStr for HypocenterFormat {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usgs" => Ok(Self::Usgs),
            "wovodat" => Ok(Self::Wovodat),
            other => Err(PrepError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "expected 'usgs' or 'wovodat'".to_string(),
            }),
        }
    }
}

impl fmt::Display for HypocenterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usgs => write!(f, "usgs"),
            Self::Wovodat => write!(f, "wovodat"),
        }
    }
}

/// Both catalogues as read off disk, before any feature derivation.
#[derive(Debug, Clone)]
pub struct RawCatalogs {
    pub hypocenters: Vec<Hypocenter>,
    pub eruptions: Vec<Eruption>,
}

/// One hypocenter with its derived temporal features. The `Option` fields
/// are unset when the query falls outside the eruption record.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: f64,
    pub magnitude: f64,
    pub hours_since_eruption: Option<f64>,
    pub hours_to_eruption: Option<f64>,
    pub trailing_count: usize,
    pub erupting: Option<bool>,
}

/// Run digest written alongside the feature table.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub hypocenters_read: usize,
    pub pruned: usize,
    pub rows: usize,
    pub eruptions: usize,
    pub catalog_start: Option<NaiveDateTime>,
    pub catalog_end: Option<NaiveDateTime>,
    pub window_hours: f64,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<FeatureRow>,
    pub csv_output: String,
    pub tsv_output: String,
    pub summary: RunSummary,
}
