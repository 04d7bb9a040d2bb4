use crate::error::{Error, Result};
use crate::interfaces::clock::{Clock, SystemClock};
use crate::types::amount::Amount;
use crate::types::balance::Balance;
use crate::types::ids::TransactionId;
use crate::wallet::state_machine::{PendingRoundUp, SendOutcome, WalletStateMachine};
use crate::wallet::transaction::{Transaction, TransactionKind};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    AddFunds,
    SendFunds,
    /// Shown over the send dialog until the user decides.
    RoundUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Green,
    Orange,
    Red,
}

impl From<TransactionKind> for Tone {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Received => Tone::Green,
            TransactionKind::Donation => Tone::Orange,
            TransactionKind::Sent => Tone::Red,
        }
    }
}

/// One line of the transaction list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub label: String,
    pub amount: String,
    pub date: String,
    pub tone: Tone,
}

impl fmt::Display for TransactionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}  {}", self.label, self.amount, self.date)
    }
}

/// What the presentation layer should tell the user after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Received {
        amount: Amount,
    },
    Sent {
        amount: Amount,
    },
    SentWithDonation {
        amount: Amount,
        donation: Amount,
    },
    RoundUpOffer(PendingRoundUp),
}

/// Wallet screen state around the state machine: which dialog is open and
/// what is typed in the amount field.
pub struct WalletScreen<C: Clock = SystemClock> {
    wallet: WalletStateMachine<C>,
    dialog: Option<Dialog>,
    input: String,
    currency_symbol: String,
}

impl<C: Clock> WalletScreen<C> {
    pub fn new(wallet: WalletStateMachine<C>, currency_symbol: impl Into<String>) -> Self {
        WalletScreen {
            wallet,
            dialog: None,
            input: String::new(),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn log_in(&mut self, address: &str) -> Result<()> {
        self.wallet.log_in(address)
    }

    /// Open the add or send dialog. Refused while a round-up is on screen.
    pub fn open(&mut self, dialog: Dialog) -> Result<()> {
        if !self.wallet.is_logged_in() {
            return Err(Error::NotLoggedIn);
        }
        if let Some(pending) = self.wallet.pending_round_up() {
            return Err(Error::RoundUpPending {
                amount: pending.amount,
                delta: pending.delta,
            });
        }
        // The round-up prompt only appears in response to a send.
        if dialog == Dialog::RoundUp {
            return Err(Error::NoPendingRoundUp);
        }
        self.dialog = Some(dialog);
        Ok(())
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Dismiss the add or send dialog. The typed amount is kept; a pending
    /// round-up cannot be dismissed.
    pub fn cancel(&mut self) -> bool {
        match self.dialog {
            Some(Dialog::AddFunds) | Some(Dialog::SendFunds) => {
                self.dialog = None;
                true
            }
            Some(Dialog::RoundUp) | None => false,
        }
    }

    /// Submit the open dialog. Failures keep the dialog and its input.
    pub fn confirm(&mut self) -> Result<Notice> {
        match self.dialog {
            Some(Dialog::AddFunds) => {
                let received = self.wallet.add_funds(&self.input)?;
                self.close();
                Ok(Notice::Received {
                    amount: received.amount,
                })
            }
            Some(Dialog::SendFunds) => match self.wallet.send_funds(&self.input)? {
                SendOutcome::Settled(sent) => {
                    self.close();
                    Ok(Notice::Sent {
                        amount: sent.amount,
                    })
                }
                SendOutcome::AwaitingRoundUp(pending) => {
                    self.dialog = Some(Dialog::RoundUp);
                    Ok(Notice::RoundUpOffer(pending))
                }
            },
            Some(Dialog::RoundUp) => match self.wallet.pending_round_up() {
                Some(pending) => Ok(Notice::RoundUpOffer(pending)),
                None => Err(Error::NoPendingRoundUp),
            },
            None => Err(Error::NoOpenDialog),
        }
    }

    /// Answer the round-up prompt ("Yes, let's do it!" / "No, thanks").
    pub fn decide_round_up(&mut self, accept: bool) -> Result<Notice> {
        let pending = self.wallet.pending_round_up().ok_or(Error::NoPendingRoundUp)?;
        self.wallet.resolve_round_up(accept)?;
        self.close();

        Ok(if accept {
            Notice::SentWithDonation {
                amount: pending.amount,
                donation: pending.delta,
            }
        } else {
            Notice::Sent {
                amount: pending.amount,
            }
        })
    }

    fn close(&mut self) {
        self.dialog = None;
        self.input.clear();
    }

    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn wallet(&self) -> &WalletStateMachine<C> {
        &self.wallet
    }

    pub fn balance_text(&self) -> String {
        self.money(self.wallet.balance())
    }

    pub fn rows(&self) -> Vec<TransactionRow> {
        self.wallet
            .ledger()
            .entries()
            .iter()
            .map(|tx| self.row(tx))
            .collect()
    }

    fn row(&self, tx: &Transaction) -> TransactionRow {
        TransactionRow {
            id: tx.id,
            label: tx.kind.to_string(),
            amount: self.money(tx.signed_amount()),
            date: tx.date.format("%Y-%m-%d").to_string(),
            tone: Tone::from(tx.kind),
        }
    }

    fn money(&self, value: Balance) -> String {
        format!("{} {}", value, self.currency_symbol)
    }

    pub fn notice_text(&self, notice: &Notice) -> String {
        let symbol = &self.currency_symbol;
        match notice {
            Notice::Received { amount } => format!("Added {} {}", amount, symbol),
            Notice::Sent { amount } => format!("Sent {} {}", amount, symbol),
            Notice::SentWithDonation { amount, donation } => {
                format!("Sent {} {} and donated {} {}", amount, symbol, donation, symbol)
            }
            Notice::RoundUpOffer(pending) => {
                format!("Add {} {} to save the world!", pending.delta, symbol)
            }
        }
    }
}

/// User-facing message for a rejected action.
pub fn alert_text(error: &Error) -> String {
    match error {
        Error::InvalidAmount { .. } => "Please enter a valid amount.".to_string(),
        Error::InsufficientBalance { .. } => "Insufficient balance.".to_string(),
        Error::EmptyAddress => "Please enter your wallet address.".to_string(),
        Error::NotLoggedIn => "Log in with your wallet address first.".to_string(),
        Error::RoundUpPending { delta, .. } => {
            format!("Answer the round-up prompt first (+{}).", delta)
        }
        Error::PermissionDenied => "No access to camera".to_string(),
        Error::PermissionPending => "Requesting for camera permission".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalletConfig;
    use crate::interfaces::clock::FixedClock;
    use chrono::NaiveDate;

    fn screen() -> WalletScreen<FixedClock> {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let wallet = WalletStateMachine::with_clock(&WalletConfig::default(), clock).unwrap();
        let mut screen = WalletScreen::new(wallet, "SOL");
        screen.log_in("4f3s...8e9k").unwrap();
        screen
    }

    #[test]
    fn test_dialogs_need_session() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let wallet = WalletStateMachine::with_clock(&WalletConfig::default(), clock).unwrap();
        let mut screen = WalletScreen::new(wallet, "SOL");
        assert!(matches!(screen.open(Dialog::AddFunds), Err(Error::NotLoggedIn)));
        assert_eq!(screen.dialog(), None);
    }

    #[test]
    fn test_round_up_prompt_cannot_be_opened_directly() {
        let mut screen = screen();
        assert!(matches!(screen.open(Dialog::RoundUp), Err(Error::NoPendingRoundUp)));
        assert_eq!(screen.dialog(), None);

        screen.open(Dialog::SendFunds).unwrap();
        assert!(screen.open(Dialog::RoundUp).is_err());
        assert_eq!(screen.dialog(), Some(Dialog::SendFunds));
    }

    #[test]
    fn test_add_closes_dialog_and_clears_input() {
        let mut screen = screen();
        screen.open(Dialog::AddFunds).unwrap();
        screen.set_input("10");

        let notice = screen.confirm().unwrap();
        assert_eq!(screen.notice_text(&notice), "Added 10.00 SOL");
        assert_eq!(screen.dialog(), None);
        assert_eq!(screen.input(), "");
        assert_eq!(screen.balance_text(), "212.00 SOL");
    }

    #[test]
    fn test_invalid_input_keeps_dialog_open() {
        let mut screen = screen();
        screen.open(Dialog::SendFunds).unwrap();
        screen.set_input("abc");

        let err = screen.confirm().unwrap_err();
        assert_eq!(alert_text(&err), "Please enter a valid amount.");
        assert_eq!(screen.dialog(), Some(Dialog::SendFunds));
        assert_eq!(screen.input(), "abc");

        screen.set_input("500");
        let err = screen.confirm().unwrap_err();
        assert_eq!(alert_text(&err), "Insufficient balance.");
    }

    #[test]
    fn test_round_up_flow() {
        let mut screen = screen();
        screen.open(Dialog::SendFunds).unwrap();
        screen.set_input("4.30");

        let offer = screen.confirm().unwrap();
        assert_eq!(screen.notice_text(&offer), "Add 0.70 SOL to save the world!");
        assert_eq!(screen.dialog(), Some(Dialog::RoundUp));
        assert!(!screen.cancel());
        assert!(screen.open(Dialog::AddFunds).is_err());

        let done = screen.decide_round_up(true).unwrap();
        assert_eq!(screen.notice_text(&done), "Sent 4.30 SOL and donated 0.70 SOL");
        assert_eq!(screen.dialog(), None);
        assert_eq!(screen.input(), "");
        assert_eq!(screen.balance_text(), "197.00 SOL");
    }

    #[test]
    fn test_cancel_keeps_typed_amount() {
        let mut screen = screen();
        screen.open(Dialog::AddFunds).unwrap();
        screen.set_input("3");
        assert!(screen.cancel());
        assert_eq!(screen.dialog(), None);
        assert_eq!(screen.input(), "3");
        assert!(!screen.cancel());
    }

    #[test]
    fn test_rows_render_signed_amounts() {
        let mut screen = screen();
        screen.open(Dialog::SendFunds).unwrap();
        screen.set_input("1.25");
        screen.confirm().unwrap();
        screen.decide_round_up(true).unwrap();

        let rows = screen.rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].to_string(), "Received: 50.00 SOL  2024-11-22");
        assert_eq!(rows[0].tone, Tone::Green);
        assert_eq!(rows[4].amount, "-1.25 SOL");
        assert_eq!(rows[4].tone, Tone::Red);
        assert_eq!(rows[5].label, "Donation");
        assert_eq!(rows[5].amount, "-0.75 SOL");
        assert_eq!(rows[5].tone, Tone::Orange);
        assert_eq!(rows[5].date, "2026-10-18");
    }
}
