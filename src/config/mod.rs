pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::HypocenterFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "volcano-prep")]
#[command(about = "Derive temporal eruption features from seismicity catalogues")]
pub struct CliConfig {
    /// Path to the hypocenter CSV export
    #[arg(long)]
    pub hypocenters: String,

    /// Path to the eruption catalogue CSV
    #[arg(long)]
    pub eruptions: String,

    /// Hypocenter file layout: usgs or wovodat
    #[arg(long, default_value = "usgs")]
    pub format: HypocenterFormat,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Output formats to write (csv, tsv, json)
    #[arg(long, value_delimiter = ',', default_value = "csv,tsv,json")]
    pub formats: Vec<String>,

    /// Trailing window for earthquake-rate counts, in hours
    #[arg(long, default_value = "168")]
    pub window_hours: f64,

    /// Keep events that precede the eruption record instead of pruning them
    #[arg(long)]
    pub keep_precatalog: bool,

    /// Bundle the written outputs into a zip archive
    #[arg(long)]
    pub bundle: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process stats after each stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn hypocenter_path(&self) -> &str {
        &self.hypocenters
    }

    fn eruption_path(&self) -> &str {
        &self.eruptions
    }

    fn hypocenter_format(&self) -> HypocenterFormat {
        self.format
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn window_hours(&self) -> f64 {
        self.window_hours
    }

    fn prune_pre_catalog(&self) -> bool {
        !self.keep_precatalog
    }

    fn bundle_outputs(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("hypocenters", &self.hypocenters)?;
        validation::validate_path("eruptions", &self.eruptions)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_extensions(
            "sources",
            &[self.hypocenters.clone(), self.eruptions.clone()],
            &["csv"],
        )?;
        validation::validate_window_hours("window_hours", self.window_hours)?;
        Ok(())
    }
}
