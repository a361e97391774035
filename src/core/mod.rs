pub mod catalog;
pub mod engine;
pub mod features;
pub mod pipeline;

pub use crate::domain::model::{
    Eruption, FeatureRow, Hypocenter, HypocenterFormat, RawCatalogs, RunSummary, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
