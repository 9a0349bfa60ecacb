use crate::cli::Environment;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber: human-readable output in development,
/// JSON lines in production. `RUST_LOG` overrides the default filter.
pub fn init_tracing(environment: Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match environment {
        Environment::Development => registry.with(fmt::layer()).init(),
        Environment::Production => registry.with(fmt::layer().json()).init(),
    }
}
