//! Logging setup for the REPL.
//!
//! Logs go to stdout at INFO+. Set `DEBUG_LOGGING=1` to enable debug output
//! for shimmer crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::new(filter_directive(debug_logging));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter)
        .init();

    tracing::info!(debug_logging, "shimmer logging initialized");
}

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        // debug for shimmer crates, info for dependencies
        "info,shimmer_core=debug,shimmer_overlay=debug,shimmer_cli=debug"
    } else {
        "info"
    }
}
