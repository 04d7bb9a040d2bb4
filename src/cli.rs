use wander_wallet::error::{Error, Result};
use wander_wallet::interfaces::clock::Clock;
use wander_wallet::observability::metrics::render_metrics;
use wander_wallet::scanner::{BarcodeKind, Scanner};
use wander_wallet::wallet::screen::{alert_text, Dialog, WalletScreen};

pub const HELP: &str = "\
commands:
  login <address>        open the wallet
  balance                show balance
  history                list transactions
  add [amount]           add funds (opens dialog; confirms when amount given)
  send [amount]          send funds (opens dialog; confirms when amount given)
  amount <text>          type into the open dialog
  confirm | cancel       submit or dismiss the open dialog
  yes | no               answer the round-up prompt
  scan <type> <payload>  deliver a decoded code (e.g. scan qr 12.5)
  rescan                 tap to scan again
  camera                 show scanner state
  export                 ledger as JSON
  metrics                prometheus text exposition
  quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Balance,
    History,
    Add(Option<String>),
    Send(Option<String>),
    Amount(String),
    Confirm,
    Cancel,
    RoundUp(bool),
    Scan(BarcodeKind, String),
    Rescan,
    Camera,
    Export,
    Metrics,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Scan payloads are kept verbatim.
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };
        let arg = rest.trim();
        let optional = || (!arg.is_empty()).then(|| arg.to_string());

        let command = match word.to_ascii_lowercase().as_str() {
            "login" => Command::Login(arg.to_string()),
            "balance" => Command::Balance,
            "history" => Command::History,
            "add" => Command::Add(optional()),
            "send" => Command::Send(optional()),
            "amount" => Command::Amount(arg.to_string()),
            "confirm" => Command::Confirm,
            "cancel" => Command::Cancel,
            "yes" => Command::RoundUp(true),
            "no" => Command::RoundUp(false),
            "scan" => {
                let rest = rest.trim_start();
                let (kind, payload) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let kind = kind.parse::<BarcodeKind>().map_err(|e| e.to_string())?;
                Command::Scan(kind, payload.trim_end_matches(['\r', '\n']).to_string())
            }
            "rescan" => Command::Rescan,
            "camera" => Command::Camera,
            "export" => Command::Export,
            "metrics" => Command::Metrics,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {} (try `help`)", other)),
        };
        Ok(Some(command))
    }
}

pub enum Flow {
    Continue(Vec<String>),
    Quit,
}

/// Terminal stand-in for the wallet and camera tabs.
pub struct App<C: Clock> {
    screen: WalletScreen<C>,
    scanner: Scanner,
    currency_symbol: String,
}

impl<C: Clock> App<C> {
    pub fn new(screen: WalletScreen<C>, scanner: Scanner, currency_symbol: impl Into<String>) -> Self {
        App {
            screen,
            scanner,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match self.dispatch(command) {
            Ok(Some(lines)) => Flow::Continue(lines),
            Ok(None) => Flow::Quit,
            Err(e) => Flow::Continue(vec![alert_text(&e)]),
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Option<Vec<String>>> {
        let lines = match command {
            Command::Login(address) => {
                self.screen.log_in(&address)?;
                vec![format!("Logged in. Balance: {}", self.screen.balance_text())]
            }
            Command::Balance => {
                self.require_session()?;
                vec![self.screen.balance_text()]
            }
            Command::History => {
                self.require_session()?;
                self.screen.rows().iter().map(ToString::to_string).collect()
            }
            Command::Add(amount) => self.open_dialog(Dialog::AddFunds, amount)?,
            Command::Send(amount) => self.open_dialog(Dialog::SendFunds, amount)?,
            Command::Amount(text) => {
                if self.screen.dialog().is_none() {
                    return Err(Error::NoOpenDialog);
                }
                self.screen.set_input(text);
                Vec::new()
            }
            Command::Confirm => {
                let notice = self.screen.confirm()?;
                vec![self.screen.notice_text(&notice)]
            }
            Command::Cancel => {
                if self.screen.cancel() {
                    vec!["Cancelled".to_string()]
                } else {
                    Vec::new()
                }
            }
            Command::RoundUp(accept) => {
                let notice = self.screen.decide_round_up(accept)?;
                vec![
                    self.screen.notice_text(&notice),
                    format!("Balance: {}", self.screen.balance_text()),
                ]
            }
            Command::Scan(kind, payload) => {
                self.scanner.ensure_ready()?;
                match self.scanner.on_decoded(kind, &payload) {
                    Some(result) => vec![result.notice(&self.currency_symbol)],
                    None => vec![self.scanner.view().to_string()],
                }
            }
            Command::Rescan => {
                self.scanner.ensure_ready()?;
                self.scanner.reset();
                vec![self.scanner.view().to_string()]
            }
            Command::Camera => vec![self.scanner.view().to_string()],
            Command::Export => {
                self.require_session()?;
                let json = serde_json::to_string_pretty(self.screen.wallet().ledger())
                    .map_err(|e| Error::SerializationError(e.to_string()))?;
                vec![json]
            }
            Command::Metrics => vec![render_metrics()],
            Command::Help => vec![HELP.to_string()],
            Command::Quit => return Ok(None),
        };
        Ok(Some(lines))
    }

    fn open_dialog(&mut self, dialog: Dialog, amount: Option<String>) -> Result<Vec<String>> {
        self.screen.open(dialog)?;
        match amount {
            Some(amount) => {
                self.screen.set_input(amount);
                let notice = self.screen.confirm()?;
                Ok(vec![self.screen.notice_text(&notice)])
            }
            None => Ok(vec!["Enter amount, then `confirm` or `cancel`".to_string()]),
        }
    }

    fn require_session(&self) -> Result<()> {
        if !self.screen.wallet().is_logged_in() {
            return Err(Error::NotLoggedIn);
        }
        Ok(())
    }
}
