use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use crate::scanner::BarcodeKind;
use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::ConfigError(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::ConfigError(e.to_string()))
}

pub fn trace_wallet_operation(operation: &'static str) -> Span {
    tracing::info_span!(
        "wallet_operation",
        operation = operation,
    )
}

pub fn trace_scan(kind: BarcodeKind) -> Span {
    tracing::info_span!(
        "scan",
        kind = %kind,
    )
}
