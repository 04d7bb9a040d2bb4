use crate::error::{Error, InvariantViolation, Result};
use crate::types::balance::Balance;
use crate::types::ids::TransactionId;
use crate::wallet::ledger::Ledger;

pub struct InvariantChecks;

impl InvariantChecks {
    pub fn check_all(balance: Balance, ledger: &Ledger) -> Result<()> {
        Self::check_ledger_reconciles(balance, ledger)?;
        Self::check_no_negative_balance(balance)?;
        Self::check_sequential_ids(ledger)?;
        Ok(())
    }

    /// Balance must equal the opening balance plus every signed entry.
    pub fn check_ledger_reconciles(balance: Balance, ledger: &Ledger) -> Result<()> {
        let implied = ledger.implied_balance();
        if implied != balance {
            return Err(Error::InvariantViolation(InvariantViolation {
                invariant: "ledger_reconciles",
                details: format!("balance is {}, ledger implies {}", balance, implied),
            }));
        }
        Ok(())
    }

    pub fn check_no_negative_balance(balance: Balance) -> Result<()> {
        if balance.is_negative() {
            return Err(Error::InvariantViolation(InvariantViolation {
                invariant: "no_negative_balance",
                details: format!("balance is {}", balance),
            }));
        }
        Ok(())
    }

    /// Ids run 1..=n in insertion order.
    pub fn check_sequential_ids(ledger: &Ledger) -> Result<()> {
        let mut expected = TransactionId::first();
        for entry in ledger.entries() {
            if entry.id != expected {
                return Err(Error::InvariantViolation(InvariantViolation {
                    invariant: "sequential_ids",
                    details: format!("expected id {}, found {}", expected, entry.id),
                }));
            }
            expected = expected.next();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::amount::Amount;
    use crate::wallet::transaction::TransactionKind;
    use chrono::NaiveDate;

    #[test]
    fn test_demo_ledger_passes() {
        let balance = Balance::from_cents(20_200);
        let ledger = Ledger::demo(balance);
        InvariantChecks::check_all(balance, &ledger).unwrap();
    }

    #[test]
    fn test_detects_drift_between_balance_and_ledger() {
        let mut ledger = Ledger::new(Balance::from_cents(1_000));
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        ledger.record(TransactionKind::Sent, Amount::from_cents(430).unwrap(), date);

        InvariantChecks::check_ledger_reconciles(Balance::from_cents(570), &ledger).unwrap();
        match InvariantChecks::check_ledger_reconciles(Balance::from_cents(1_000), &ledger) {
            Err(Error::InvariantViolation(v)) => assert_eq!(v.invariant, "ledger_reconciles"),
            other => panic!("expected violation, got {other:?}"),
        }
    }

    #[test]
    fn test_detects_negative_balance() {
        assert!(InvariantChecks::check_no_negative_balance(Balance::zero()).is_ok());
        assert!(InvariantChecks::check_no_negative_balance(Balance::from_cents(-1)).is_err());
    }
}
