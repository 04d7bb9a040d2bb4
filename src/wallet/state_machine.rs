use crate::config::WalletConfig;
use crate::error::{Error, Result};
use crate::interfaces::clock::{Clock, SystemClock};
use crate::invariants::checks::InvariantChecks;
use crate::observability::metrics::{OPERATIONS_REJECTED, TRANSACTIONS_RECORDED};
use crate::observability::tracing::trace_wallet_operation;
use crate::types::amount::Amount;
use crate::types::balance::Balance;
use crate::wallet::ledger::Ledger;
use crate::wallet::session::Session;
use crate::wallet::transaction::{Transaction, TransactionKind};

/// A non-integral send waiting for the user to accept or decline the round-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRoundUp {
    pub amount: Amount,
    pub delta: Amount,
}

impl PendingRoundUp {
    /// Total debit if the round-up is accepted.
    pub fn rounded_total(&self) -> Amount {
        self.amount.ceil_whole()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Settled(Transaction),
    AwaitingRoundUp(PendingRoundUp),
}

/// In-memory wallet: balance, ledger, session and any pending round-up.
///
/// Balance and ledger only change together, through `settle`.
pub struct WalletStateMachine<C: Clock = SystemClock> {
    session: Session,
    balance: Balance,
    ledger: Ledger,
    pending: Option<PendingRoundUp>,
    round_up_enabled: bool,
    clock: C,
}

impl WalletStateMachine<SystemClock> {
    pub fn from_config(config: &WalletConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> WalletStateMachine<C> {
    pub fn new(ledger: Ledger, round_up_enabled: bool, clock: C) -> Self {
        WalletStateMachine {
            session: Session::LoggedOut,
            balance: ledger.implied_balance(),
            ledger,
            pending: None,
            round_up_enabled,
            clock,
        }
    }

    pub fn with_clock(config: &WalletConfig, clock: C) -> Result<Self> {
        let starting = Balance::parse(&config.starting_balance)
            .filter(|b| !b.is_negative())
            .ok_or_else(|| Error::ConfigError(format!(
                "wallet.starting_balance must be a non-negative decimal, got {:?}",
                config.starting_balance
            )))?;

        let ledger = if config.seed_demo_transactions {
            Ledger::demo(starting)
        } else {
            Ledger::new(starting)
        };

        Ok(Self::new(ledger, config.round_up_enabled, clock))
    }

    pub fn log_in(&mut self, address: &str) -> Result<()> {
        let _span = trace_wallet_operation("log_in").entered();
        self.session
            .log_in(address)
            .inspect_err(|e| record_rejection("log_in", e))?;
        tracing::info!(address = self.session.address().unwrap_or_default(), "Wallet session opened");
        Ok(())
    }

    /// Credit the wallet with a user-entered amount.
    pub fn add_funds(&mut self, input: &str) -> Result<Transaction> {
        let _span = trace_wallet_operation("add_funds").entered();
        self.try_add_funds(input)
            .inspect_err(|e| record_rejection("add_funds", e))
    }

    /// Debit the wallet. Non-integral amounts wait for a round-up decision
    /// and leave balance and ledger untouched until `resolve_round_up`.
    pub fn send_funds(&mut self, input: &str) -> Result<SendOutcome> {
        let _span = trace_wallet_operation("send_funds").entered();
        self.try_send_funds(input)
            .inspect_err(|e| record_rejection("send_funds", e))
    }

    /// Settle the pending send, plus the round-up as a donation if accepted.
    pub fn resolve_round_up(&mut self, accept: bool) -> Result<Vec<Transaction>> {
        let _span = trace_wallet_operation("resolve_round_up").entered();
        self.try_resolve_round_up(accept)
            .inspect_err(|e| record_rejection("resolve_round_up", e))
    }

    fn try_add_funds(&mut self, input: &str) -> Result<Transaction> {
        self.require_ready()?;
        let amount = Amount::parse(input)?;
        if self.balance.checked_add(amount).is_none() {
            return Err(Error::InvalidAmount {
                input: input.to_string(),
            });
        }

        let received = self.settle(TransactionKind::Received, amount)?;
        self.check_invariants()?;
        Ok(received)
    }

    fn try_send_funds(&mut self, input: &str) -> Result<SendOutcome> {
        self.require_ready()?;
        let amount = Amount::parse(input)?;

        if !self.balance.covers(amount) {
            return Err(Error::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        if self.round_up_enabled {
            if let Some(delta) = amount.round_up_delta() {
                let pending = PendingRoundUp { amount, delta };
                tracing::info!(amount = %amount, delta = %delta, "Round-up offered");
                self.pending = Some(pending);
                return Ok(SendOutcome::AwaitingRoundUp(pending));
            }
        }

        let sent = self.settle(TransactionKind::Sent, amount)?;
        self.check_invariants()?;
        Ok(SendOutcome::Settled(sent))
    }

    fn try_resolve_round_up(&mut self, accept: bool) -> Result<Vec<Transaction>> {
        self.require_logged_in()?;
        let pending = self.pending.ok_or(Error::NoPendingRoundUp)?;

        // The decision stays open so the user can still decline.
        if accept && !self.balance.covers(pending.rounded_total()) {
            return Err(Error::InsufficientBalance {
                requested: pending.rounded_total(),
                available: self.balance,
            });
        }

        self.pending = None;
        let mut settled = vec![self.settle(TransactionKind::Sent, pending.amount)?];
        if accept {
            settled.push(self.settle(TransactionKind::Donation, pending.delta)?);
        }
        tracing::info!(accepted = accept, "Round-up resolved");

        self.check_invariants()?;
        Ok(settled)
    }

    /// Balance is computed before the ledger is touched, so an overflow
    /// leaves both unchanged.
    fn settle(&mut self, kind: TransactionKind, amount: Amount) -> Result<Transaction> {
        let balance = match kind {
            TransactionKind::Received => self.balance.checked_add(amount),
            TransactionKind::Sent | TransactionKind::Donation => self.balance.checked_sub(amount),
        }
        .ok_or_else(|| Error::InvalidAmount {
            input: amount.to_string(),
        })?;

        let entry = self.ledger.record(kind, amount, self.clock.today());
        self.balance = balance;

        TRANSACTIONS_RECORDED.with_label_values(&[kind.as_str()]).inc();
        tracing::info!(
            id = %entry.id,
            kind = kind.as_str(),
            amount = %amount,
            balance = %self.balance,
            "Transaction recorded"
        );
        Ok(entry)
    }

    fn check_invariants(&self) -> Result<()> {
        InvariantChecks::check_all(self.balance, &self.ledger).inspect_err(|e| {
            tracing::error!("Invariant violation detected: {}", e);
        })
    }

    fn require_logged_in(&self) -> Result<()> {
        if !self.session.is_logged_in() {
            return Err(Error::NotLoggedIn);
        }
        Ok(())
    }

    fn require_ready(&self) -> Result<()> {
        self.require_logged_in()?;
        if let Some(pending) = self.pending {
            return Err(Error::RoundUpPending {
                amount: pending.amount,
                delta: pending.delta,
            });
        }
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn pending_round_up(&self) -> Option<PendingRoundUp> {
        self.pending
    }
}

fn record_rejection(operation: &'static str, error: &Error) {
    OPERATIONS_REJECTED
        .with_label_values(&[operation, error.reason()])
        .inc();
    tracing::warn!(operation, reason = error.reason(), "Operation rejected: {}", error);
}
