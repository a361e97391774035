pub mod config;
pub mod core;
pub mod domain;
pub mod loaders;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::catalog::EruptionCatalog;
pub use crate::core::features::FeatureTable;
pub use crate::core::{engine::PrepEngine, pipeline::FeaturePipeline};
pub use crate::domain::model::{Eruption, Hypocenter, HypocenterFormat};
pub use crate::utils::error::{PrepError, Result};
