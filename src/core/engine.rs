use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

/// Runs a pipeline's three stages in order, with stage logging and optional
/// process-stat snapshots.
pub struct PrepEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> PrepEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&mut self) -> Result<String> {
        tracing::info!("Extracting catalogues...");
        let raw = self.pipeline.extract()?;
        tracing::info!(
            "Loaded {} hypocenters and {} eruptions",
            raw.hypocenters.len(),
            raw.eruptions.len()
        );
        self.monitor.log_stats("extract");

        tracing::info!("Deriving features...");
        let result = self.pipeline.transform(raw)?;
        tracing::info!(
            "Derived {} feature rows ({} pruned)",
            result.rows.len(),
            result.summary.pruned
        );
        self.monitor.log_stats("transform");

        tracing::info!("Writing outputs...");
        let output_path = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
