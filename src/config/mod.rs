use serde::{Deserialize, Serialize};
use crate::scanner::{BarcodeKind, PermissionStatus};

pub mod loader;

pub use loader::AppConfig;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WalletConfig {
    /// Balance shown right after log-in, as decimal text.
    pub starting_balance: String,
    pub currency_symbol: String,
    pub seed_demo_transactions: bool,
    pub round_up_enabled: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        WalletConfig {
            starting_balance: "202.00".to_string(),
            currency_symbol: crate::DEFAULT_CURRENCY_SYMBOL.to_string(),
            seed_demo_transactions: true,
            round_up_enabled: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ScannerConfig {
    pub barcode_types: Vec<BarcodeKind>,
    /// Outcome reported by the terminal front end, which has no camera.
    pub simulated_permission: PermissionStatus,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            barcode_types: vec![BarcodeKind::Qr, BarcodeKind::Pdf417],
            simulated_permission: PermissionStatus::Granted,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}
