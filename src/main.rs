use clap::Parser;
use volcano_prep::utils::{logger, validation::Validate};
use volcano_prep::{CliConfig, FeaturePipeline, LocalStorage, PrepEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting volcano-prep");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("Process monitoring enabled");
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = FeaturePipeline::new(storage, config);
    let mut engine = PrepEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("Feature preparation completed");
            println!("Feature tables written to {}", output_path);
        }
        Err(e) => {
            tracing::error!("Feature preparation failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
