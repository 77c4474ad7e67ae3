use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Initialize application logging.
///
/// Configures:
/// - `tracing-subscriber::fmt` in compact or JSON form, per `log.format`.
/// - `EnvFilter` for dynamic log levels (`RUST_LOG`).
pub fn init(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(filter());

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gyrolaser_server=debug,tower_http=debug"))
}
