pub mod amount;
pub mod balance;
pub mod ids;
