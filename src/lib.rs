pub mod types;
pub mod wallet;
pub mod scanner;
pub mod interfaces;
pub mod invariants;
pub mod error;
pub mod config;
pub mod observability;

// Display unit for balances and amounts
pub const DEFAULT_CURRENCY_SYMBOL: &str = "SOL";
