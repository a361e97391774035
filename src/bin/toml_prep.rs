use anyhow::Result;
use clap::Parser;
use volcano_prep::config::toml_config::TomlConfig;
use volcano_prep::core::ConfigProvider;
use volcano_prep::utils::{logger, validation::Validate};
use volcano_prep::{FeaturePipeline, LocalStorage, PrepEngine};

#[derive(Parser)]
#[command(name = "toml-prep")]
#[command(about = "Feature preparation driven by a TOML run description")]
struct Args {
    /// Path to the TOML run description
    #[arg(short, long, default_value = "prep-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of the compact format
    #[arg(long)]
    log_json: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be processed without running
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading run description from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Configuration loaded and validated");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("Dry run requested, stopping before extraction");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("Run: {} v{}", config.run.name, config.run.version);
    println!("  Hypocenters: {} ({})", config.source.hypocenters, config.hypocenter_format());
    println!("  Eruptions:   {}", config.source.eruptions);
    println!("  Output:      {}", config.output_path());
    println!("  Formats:     {}", config.load.output_formats.join(", "));
    println!("  Rate window: {} h", config.window_hours());
    println!("  Prune pre-catalogue events: {}", config.prune());

    if config.bundle_outputs() {
        println!("  Bundle:      features.zip");
    }

    if args.dry_run {
        println!("  DRY RUN - nothing will be written");
    }

    println!();
}
