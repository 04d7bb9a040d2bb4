use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Wallet metrics
    pub static ref TRANSACTIONS_RECORDED: IntCounterVec = IntCounterVec::new(
        Opts::new("wallet_transactions_recorded_total", "Transactions appended to the ledger"),
        &["kind"]
    ).unwrap();

    pub static ref OPERATIONS_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("wallet_operations_rejected_total", "Wallet operations rejected"),
        &["operation", "reason"]
    ).unwrap();

    // Scanner metrics
    pub static ref SCANS_ACCEPTED: IntCounter = IntCounter::new(
        "scanner_scans_accepted_total",
        "Decoded codes surfaced to the user"
    ).unwrap();

    pub static ref SCANS_IGNORED: IntCounterVec = IntCounterVec::new(
        Opts::new("scanner_scans_ignored_total", "Decode events dropped by the scan gate"),
        &["reason"]
    ).unwrap();
}

pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(TRANSACTIONS_RECORDED.clone()))?;
    REGISTRY.register(Box::new(OPERATIONS_REJECTED.clone()))?;
    REGISTRY.register(Box::new(SCANS_ACCEPTED.clone()))?;
    REGISTRY.register(Box::new(SCANS_IGNORED.clone()))?;
    Ok(())
}

/// Text exposition of everything in `REGISTRY`.
pub fn render_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
