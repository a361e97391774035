use crate::core::catalog::EruptionCatalog;
use crate::core::features::{prune_pre_catalog, FeatureTable};
use crate::core::{ConfigProvider, Pipeline, RawCatalogs, RunSummary, Storage, TransformResult};
use crate::domain::model::FeatureRow;
use crate::loaders::{load_eruptions, load_hypocenters_with_format};
use crate::utils::error::{PrepError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub struct FeaturePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FeaturePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for FeaturePipeline<S, C> {
    fn extract(&self) -> Result<RawCatalogs> {
        tracing::debug!(
            "Reading hypocenter file ({}): {}",
            self.config.hypocenter_format(),
            self.config.hypocenter_path()
        );
        let raw = self.storage.read_file(self.config.hypocenter_path())?;
        let hypocenters =
            load_hypocenters_with_format(raw.as_slice(), self.config.hypocenter_format())?;
        tracing::debug!("Parsed {} hypocenters", hypocenters.len());

        tracing::debug!("Reading eruption file: {}", self.config.eruption_path());
        let raw = self.storage.read_file(self.config.eruption_path())?;
        let eruptions = load_eruptions(raw.as_slice())?;
        tracing::debug!("Parsed {} eruptions", eruptions.len());

        Ok(RawCatalogs {
            hypocenters,
            eruptions,
        })
    }

    fn transform(&self, data: RawCatalogs) -> Result<TransformResult> {
        let catalog = EruptionCatalog::from_entries(data.eruptions);
        let read = data.hypocenters.len();

        let kept = if self.config.prune_pre_catalog() {
            prune_pre_catalog(&catalog, data.hypocenters)
        } else {
            data.hypocenters
        };
        let pruned = read - kept.len();
        if pruned > 0 {
            tracing::debug!("Dropped {} events preceding the eruption record", pruned);
        }

        let window_hours = self.config.window_hours();
        let table = FeatureTable::derive(&catalog, &kept, window_hours);

        let csv_output = render_delimited(&table.rows, ',');
        let tsv_output = render_delimited(&table.rows, '\t');
        let summary = RunSummary {
            hypocenters_read: read,
            pruned,
            rows: table.len(),
            eruptions: catalog.len(),
            catalog_start: catalog.start(),
            catalog_end: catalog.end(),
            window_hours,
        };

        Ok(TransformResult {
            rows: table.rows,
            csv_output,
            tsv_output,
            summary,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        let mut written: Vec<(&'static str, Vec<u8>)> = Vec::new();

        for format in self.config.output_formats() {
            let entry = match format.as_str() {
                "csv" => ("features.csv", result.csv_output.clone().into_bytes()),
                "tsv" => ("features.tsv", result.tsv_output.clone().into_bytes()),
                "json" => (
                    "summary.json",
                    serde_json::to_string_pretty(&result.summary)?.into_bytes(),
                ),
                other => {
                    return Err(PrepError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "expected csv, tsv or json".to_string(),
                    })
                }
            };
            written.push(entry);
        }

        for (name, data) in &written {
            self.storage
                .write_file(&format!("{}/{}", output_path, name), data)?;
        }

        if self.config.bundle_outputs() {
            tracing::debug!("Bundling {} output files", written.len());
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &written {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(data)?;
                }
                let cursor = zip.finish()?;
                cursor.into_inner()
            };
            self.storage
                .write_file(&format!("{}/features.zip", output_path), &zip_data)?;
        }

        Ok(output_path.to_string())
    }
}

fn render_delimited(rows: &[FeatureRow], sep: char) -> String {
    let header = [
        "time",
        "latitude",
        "longitude",
        "depth",
        "mag",
        "hours_since_eruption",
        "hours_to_eruption",
        "trailing_count",
        "erupting",
    ];
    let mut lines = vec![header.join(&sep.to_string())];

    for row in rows {
        let fields = [
            row.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            row.latitude.to_string(),
            row.longitude.to_string(),
            row.depth_km.to_string(),
            row.magnitude.to_string(),
            fmt_opt_hours(row.hours_since_eruption),
            fmt_opt_hours(row.hours_to_eruption),
            row.trailing_count.to_string(),
            row.erupting.map(|b| b.to_string()).unwrap_or_default(),
        ];
        lines.push(fields.join(&sep.to_string()));
    }

    lines.join("\n")
}

fn fmt_opt_hours(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HypocenterFormat;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const HYPOCENTERS: &str = "\
time,latitude,longitude,depth,mag
1982-12-20T08:00:00Z,19.400,-155.280,2.0,1.5
1983-01-05T12:00:00Z,19.409,-155.283,2.5,2.1
1983-01-05T14:00:00Z,19.410,-155.284,3.1,1.9
";

    const ERUPTIONS: &str = "\
Number,Date,Repose,Length,Flow Area,Flow Volume,Rate,Location
1,01/03/83,0.0,190 hrs,0.1,14.0,2.1,Napau Crater
2,02/10/83,30.1,48 hrs,0.2,8.0,1.4,Central vent
";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        fn seed(&self, path: &str, data: &str) {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                PrepError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        output_formats: Vec<String>,
        prune: bool,
        bundle: bool,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                output_formats: vec!["csv".into(), "tsv".into(), "json".into()],
                prune: true,
                bundle: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn hypocenter_path(&self) -> &str {
            "hypocenters.csv"
        }

        fn eruption_path(&self) -> &str {
            "eruptions.csv"
        }

        fn hypocenter_format(&self) -> HypocenterFormat {
            HypocenterFormat::Usgs
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn window_hours(&self) -> f64 {
            168.0
        }

        fn prune_pre_catalog(&self) -> bool {
            self.prune
        }

        fn bundle_outputs(&self) -> bool {
            self.bundle
        }
    }

    fn seeded_pipeline(config: MockConfig) -> (MockStorage, FeaturePipeline<MockStorage, MockConfig>) {
        let storage = MockStorage::new();
        storage.seed("hypocenters.csv", HYPOCENTERS);
        storage.seed("eruptions.csv", ERUPTIONS);
        (storage.clone(), FeaturePipeline::new(storage, config))
    }

    #[test]
    fn test_extract_parses_both_catalogues() {
        let (_, pipeline) = seeded_pipeline(MockConfig::new());
        let raw = pipeline.extract().unwrap();

        assert_eq!(raw.hypocenters.len(), 3);
        assert_eq!(raw.eruptions.len(), 2);
    }

    #[test]
    fn test_extract_missing_file_is_an_error() {
        let storage = MockStorage::new();
        let pipeline = FeaturePipeline::new(storage, MockConfig::new());
        assert!(pipeline.extract().is_err());
    }

    #[test]
    fn test_transform_prunes_and_derives() {
        let (_, pipeline) = seeded_pipeline(MockConfig::new());
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();

        // the 1982 event precedes the eruption record
        assert_eq!(result.summary.hypocenters_read, 3);
        assert_eq!(result.summary.pruned, 1);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].erupting, Some(true));
        assert_eq!(result.rows[0].hours_since_eruption, Some(60.0));
        assert_eq!(result.rows[1].trailing_count, 2);
    }

    #[test]
    fn test_transform_without_pruning_keeps_unset_rows() {
        let mut config = MockConfig::new();
        config.prune = false;
        let (_, pipeline) = seeded_pipeline(config);
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();

        assert_eq!(result.summary.pruned, 0);
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[0].erupting, None);
    }

    #[test]
    fn test_transform_renders_header_and_rows() {
        let (_, pipeline) = seeded_pipeline(MockConfig::new());
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();

        let csv_lines: Vec<&str> = result.csv_output.split('\n').collect();
        assert_eq!(csv_lines.len(), 3);
        assert_eq!(
            csv_lines[0],
            "time,latitude,longitude,depth,mag,hours_since_eruption,hours_to_eruption,trailing_count,erupting"
        );
        assert_eq!(
            csv_lines[1],
            "1983-01-05T12:00:00,19.409,-155.283,2.5,2.1,60.000,852.000,1,true"
        );

        let tsv_lines: Vec<&str> = result.tsv_output.split('\n').collect();
        assert_eq!(tsv_lines.len(), 3);
        assert!(tsv_lines[1].starts_with("1983-01-05T12:00:00\t19.409\t"));
    }

    #[test]
    fn test_load_writes_requested_formats() {
        let (storage, pipeline) = seeded_pipeline(MockConfig::new());
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();
        let output_path = pipeline.load(result).unwrap();

        assert_eq!(output_path, "out");
        assert!(storage.get_file("out/features.csv").is_some());
        assert!(storage.get_file("out/features.tsv").is_some());
        assert!(storage.get_file("out/summary.json").is_some());
        assert!(storage.get_file("out/features.zip").is_none());

        let summary: serde_json::Value =
            serde_json::from_slice(&storage.get_file("out/summary.json").unwrap()).unwrap();
        assert_eq!(summary["rows"], 2);
        assert_eq!(summary["pruned"], 1);
        assert_eq!(summary["eruptions"], 2);
    }

    #[test]
    fn test_load_respects_format_subset() {
        let mut config = MockConfig::new();
        config.output_formats = vec!["csv".into()];
        let (storage, pipeline) = seeded_pipeline(config);
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();
        pipeline.load(result).unwrap();

        assert!(storage.get_file("out/features.csv").is_some());
        assert!(storage.get_file("out/features.tsv").is_none());
        assert!(storage.get_file("out/summary.json").is_none());
    }

    #[test]
    fn test_load_unknown_format_is_an_error() {
        let mut config = MockConfig::new();
        config.output_formats = vec!["parquet".into()];
        let (_, pipeline) = seeded_pipeline(config);
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();
        assert!(pipeline.load(result).is_err());
    }

    #[test]
    fn test_load_bundle_contains_written_files() {
        let mut config = MockConfig::new();
        config.bundle = true;
        let (storage, pipeline) = seeded_pipeline(config);
        let raw = pipeline.extract().unwrap();
        let result = pipeline.transform(raw).unwrap();
        pipeline.load(result).unwrap();

        let zip_bytes = storage.get_file("out/features.zip").unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        assert_eq!(archive.len(), 3);
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["features.csv", "features.tsv", "summary.json"]);
    }
}
