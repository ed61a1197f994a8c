use anyhow::Context;

use tracing::subscriber::set_global_default;

use tracing_log::LogTracer;

use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the supplied
/// default filter.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to initialize logging")?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = fmt::fmt()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE)
        .finish();

    set_global_default(subscriber).context("Failed to set global subscriber")
}
