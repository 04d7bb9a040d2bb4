pub mod ledger;
pub mod screen;
pub mod session;
pub mod state_machine;
pub mod transaction;
