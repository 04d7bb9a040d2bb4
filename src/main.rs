mod cli;

use clap::Parser;
use cli::{App, Command, Flow, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use wander_wallet::config::AppConfig;
use wander_wallet::interfaces::camera::StaticPermission;
use wander_wallet::observability::metrics::register_metrics;
use wander_wallet::observability::tracing::init_tracing;
use wander_wallet::scanner::Scanner;
use wander_wallet::wallet::screen::{alert_text, WalletScreen};
use wander_wallet::wallet::state_machine::WalletStateMachine;

#[derive(Parser, Debug)]
#[command(name = "wander-wallet", about = "Mock wallet and QR scanner in the terminal")]
struct Args {
    /// Loads config/<env>.toml on top of config/default.toml
    #[arg(long, default_value = "local")]
    env: String,

    /// Log in with this address at startup
    #[arg(long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.env)?;
    init_tracing(&config.logging)?;
    register_metrics()?;

    let wallet = WalletStateMachine::from_config(&config.wallet)?;
    let mut screen = WalletScreen::new(wallet, config.wallet.currency_symbol.clone());
    if let Some(address) = args.address.as_deref() {
        if let Err(e) = screen.log_in(address) {
            println!("{}", alert_text(&e));
        }
    }

    let mut scanner = Scanner::new(config.scanner.barcode_types.clone());
    let permission = StaticPermission(config.scanner.simulated_permission);
    scanner.request_permission(&permission).await;

    tracing::info!(env = %args.env, "Wander wallet started");
    println!("{}", HELP);
    println!("Camera: {}", scanner.view());

    let mut app = App::new(screen, scanner, config.wallet.currency_symbol.clone());
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());

    while let Some(line) = lines.next().await {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match app.handle(command) {
            Flow::Continue(output) => output.iter().for_each(|l| println!("{}", l)),
            Flow::Quit => break,
        }
    }

    tracing::info!("Wander wallet stopped");
    Ok(())
}
