use thiserror::Error;
use crate::types::amount::Amount;
use crate::types::balance::Balance;

#[derive(Error, Debug)]
pub enum Error {
    // Input Errors
    #[error("Invalid amount: {input:?}")]
    InvalidAmount {
        input: String,
    },

    #[error("Wallet address must not be empty")]
    EmptyAddress,

    // Wallet Errors
    #[error("Insufficient balance: requested={requested}, available={available}")]
    InsufficientBalance {
        requested: Amount,
        available: Balance,
    },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Already logged in as {0}")]
    AlreadyLoggedIn(String),

    #[error("Round-up decision pending for {amount} (+{delta})")]
    RoundUpPending {
        amount: Amount,
        delta: Amount,
    },

    #[error("No round-up decision pending")]
    NoPendingRoundUp,

    #[error("No dialog open")]
    NoOpenDialog,

    // Scanner Errors
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera permission not yet resolved")]
    PermissionPending,

    #[error("Unknown barcode type: {0}")]
    UnknownBarcodeType(String),

    // Invariant Errors
    #[error("Invariant violation: {0}")]
    InvariantViolation(InvariantViolation),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // IO Errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Short label used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidAmount { .. } => "invalid_amount",
            Error::EmptyAddress => "empty_address",
            Error::InsufficientBalance { .. } => "insufficient_balance",
            Error::NotLoggedIn => "not_logged_in",
            Error::AlreadyLoggedIn(_) => "already_logged_in",
            Error::RoundUpPending { .. } => "round_up_pending",
            Error::NoPendingRoundUp => "no_pending_round_up",
            Error::NoOpenDialog => "no_open_dialog",
            Error::PermissionDenied => "permission_denied",
            Error::PermissionPending => "permission_pending",
            Error::UnknownBarcodeType(_) => "unknown_barcode_type",
            Error::InvariantViolation(_) => "invariant_violation",
            Error::ConfigError(_) => "config",
            Error::SerializationError(_) => "serialization",
            Error::IoError(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub invariant: &'static str,
    pub details: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.details)
    }
}
