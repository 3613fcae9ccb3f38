// Logging setup for the CLI. Logs go to stderr so they do not interleave
// with the interactive menu on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "texie_cli=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn setup() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
    tracing::debug!("Logging initialized");
}
