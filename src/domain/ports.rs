use crate::domain::model::{HypocenterFormat, RawCatalogs, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn hypocenter_path(&self) -> &str;
    fn eruption_path(&self) -> &str;
    fn hypocenter_format(&self) -> HypocenterFormat;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn window_hours(&self) -> f64;
    fn prune_pre_catalog(&self) -> bool;
    fn bundle_outputs(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<RawCatalogs>;
    fn transform(&self, data: RawCatalogs) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
