use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter, e.g. `csv_inspect=debug`
pub const LOG_ENV_VAR: &str = "CSV_INSPECT_LOG";

/// Filter used when the environment does not provide one
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing to stderr.
///
/// `CSV_INSPECT_LOG` wins over `verbose`. Calling this twice is harmless;
/// the second call keeps the first subscriber.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::LocalTime::rfc_3339())
        .compact();

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if initialized {
        tracing::debug!(target: "csv_inspect", "Logging initialized");
    }
}
