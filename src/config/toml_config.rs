use crate::core::ConfigProvider;
use crate::domain::model::HypocenterFormat;
use crate::utils::error::{PrepError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub run: RunConfig,
    pub source: SourceConfig,
    pub features: Option<FeaturesConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub hypocenters: String,
    pub eruptions: String,
    pub format: Option<HypocenterFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    pub window_hours: Option<f64>,
    pub prune: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PrepError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PrepError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Replace ${VAR_NAME} with the environment value; unresolvable names
    // stay verbatim so the validation error points at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("run.name", &self.run.name)?;
        validation::validate_path("source.hypocenters", &self.source.hypocenters)?;
        validation::validate_path("source.eruptions", &self.source.eruptions)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_file_extensions(
            "source",
            &[self.source.hypocenters.clone(), self.source.eruptions.clone()],
            &["csv"],
        )?;
        validation::validate_window_hours("features.window_hours", self.window_hours())?;

        let valid_formats = ["csv", "tsv", "json"];
        for format in &self.load.output_formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(PrepError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn window_hours(&self) -> f64 {
        self.features
            .as_ref()
            .and_then(|f| f.window_hours)
            .unwrap_or(168.0)
    }

    pub fn prune(&self) -> bool {
        self.features
            .as_ref()
            .and_then(|f| f.prune)
            .unwrap_or(true)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn hypocenter_path(&self) -> &str {
        &self.source.hypocenters
    }

    fn eruption_path(&self) -> &str {
        &self.source.eruptions
    }

    fn hypocenter_format(&self) -> HypocenterFormat {
        self.source.format.unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn window_hours(&self) -> f64 {
        self.window_hours()
    }

    fn prune_pre_catalog(&self) -> bool {
        self.prune()
    }

    fn bundle_outputs(&self) -> bool {
        self.load.bundle.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
