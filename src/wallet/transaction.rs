use crate::types::amount::Amount;
use crate::types::balance::Balance;
use crate::types::ids::TransactionId;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub date: NaiveDate,
}

impl Transaction {
    /// Effect of this transaction on the wallet balance.
    pub fn signed_amount(&self) -> Balance {
        match self.kind.direction() {
            Direction::Credit => Balance::from(self.amount),
            Direction::Debit => -Balance::from(self.amount),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionKind {
    Received,
    Sent,
    Donation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn direction(&self) -> Direction {
        match self {
            TransactionKind::Received => Direction::Credit,
            TransactionKind::Sent | TransactionKind::Donation => Direction::Debit,
        }
    }

    /// Label used for log fields and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Received => "received",
            TransactionKind::Sent => "sent",
            TransactionKind::Donation => "donation",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Received => "Received",
            TransactionKind::Sent => "Sent",
            TransactionKind::Donation => "Donation",
        };
        write!(f, "{}", label)
    }
}
