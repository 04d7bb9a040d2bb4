use crate::types::amount::Amount;
use crate::types::balance::Balance;
use crate::types::ids::TransactionId;
use crate::wallet::transaction::{Transaction, TransactionKind};
use chrono::NaiveDate;
use serde::Serialize;

/// Append-only, chronologically ordered list of wallet transactions.
#[derive(Clone, Debug, Serialize)]
pub struct Ledger {
    /// Balance carried in from before the first recorded entry.
    opening_balance: Balance,
    entries: Vec<Transaction>,
}

/// Entries shown to a fresh session: (kind, whole units, y, m, d).
const DEMO_ENTRIES: [(TransactionKind, i64, i32, u32, u32); 4] = [
    (TransactionKind::Received, 50, 2024, 11, 22),
    (TransactionKind::Received, 20, 2024, 11, 20),
    (TransactionKind::Received, 50, 2023, 10, 20),
    (TransactionKind::Sent, 20, 2023, 9, 19),
];

impl Ledger {
    pub fn new(opening_balance: Balance) -> Self {
        Ledger {
            opening_balance,
            entries: Vec::new(),
        }
    }

    /// Ledger seeded with the demo history, ending at `balance`.
    pub fn demo(balance: Balance) -> Self {
        let mut ledger = Ledger::new(Balance::zero());
        for (kind, units, year, month, day) in DEMO_ENTRIES {
            let entry = Amount::whole(units).zip(NaiveDate::from_ymd_opt(year, month, day));
            if let Some((amount, date)) = entry {
                ledger.record(kind, amount, date);
            }
        }
        ledger.opening_balance = balance - ledger.net_total();
        ledger
    }

    pub fn record(&mut self, kind: TransactionKind, amount: Amount, date: NaiveDate) -> Transaction {
        let entry = Transaction {
            id: self.next_id(),
            kind,
            amount,
            date,
        };
        self.entries.push(entry);
        entry
    }

    pub fn next_id(&self) -> TransactionId {
        TransactionId(self.entries.len() as u64 + 1)
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn opening_balance(&self) -> Balance {
        self.opening_balance
    }

    /// Sum of signed entry amounts.
    pub fn net_total(&self) -> Balance {
        self.entries.iter().map(Transaction::signed_amount).sum()
    }

    /// Balance implied by the opening balance and every recorded entry.
    pub fn implied_balance(&self) -> Balance {
        self.opening_balance + self.net_total()
    }

    pub fn total_for(&self, kind: TransactionKind) -> Balance {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| Balance::from(e.amount))
            .sum()
    }
}
