use tracing_subscriber::EnvFilter;

/// Initialize tracing from the CLI verbosity count.
///
/// Without `-v` only warnings show. One `-v` enables info, two enable
/// debug, three or more enable trace. A set `RUST_LOG` env var wins over
/// the flag.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter = format!("naiad={level},naiad_compare={level},naiad_output={level}");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
