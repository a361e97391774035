use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compact stderr logging for interactive runs.
pub fn init_cli_logger(verbose: bool) {
    init(verbose, false);
}

/// JSON-line logging for non-interactive capture (cron, notebooks shelling
/// out).
pub fn init_json_logger(verbose: bool) {
    init(verbose, true);
}

fn init(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "volcano_prep=debug,info"
    } else {
        "volcano_prep=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt.json()).init();
    } else {
        registry.with(fmt.compact()).init();
    }
}
