use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match configured {
        Some(level) if !verbose => EnvFilter::new(format!("geoserver_terrain={}", level)),
        _ if verbose => EnvFilter::new("geoserver_terrain=debug,info"),
        _ => EnvFilter::new("geoserver_terrain=info"),
    })
}

pub fn init_cli_logger(verbose: bool, configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stdout, for hosts that ship logs to a collector.
pub fn init_json_logger(configured: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(false, configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
