mod app;
mod booking;
mod botcheck;
mod components;
mod config;
mod data;
mod events;
mod notify;
mod routes;
mod session;
mod theme;
mod utils;

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::botcheck::BotCheck;
use crate::config::Config;
use crate::data::TicketService;
use crate::data::contract::TicketContract;
use crate::data::provider::ChainProvider;
use crate::events::View;
use crate::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    // The terminal belongs to the UI, so logs go to a file
    let log_path = config.log_path();
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("opening log file {}", log_path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .init();

    let preset = data::chains::get_chain_config(&config.chain);
    let rpc_url = match (&config.rpc_url, &preset) {
        (Some(url), _) => url.clone(),
        (None, Some(chain)) => chain.rpc_url.clone(),
        (None, None) => return Err(eyre!("unknown chain '{}' and no --rpc-url given", config.chain)),
    };

    let signer = config
        .private_key
        .as_deref()
        .map(|key| key.trim().parse::<PrivateKeySigner>())
        .transpose()
        .wrap_err("invalid private key")?;
    if signer.is_none() {
        tracing::warn!("no private key configured; purchases and listings are disabled");
    }

    eprintln!("Connecting to {rpc_url}...");
    let provider = ChainProvider::connect(&rpc_url, signer).await?;
    let chain_id = provider.chain_id();
    if let Some(chain) = preset.as_ref().filter(|c| c.chain_id != chain_id) {
        tracing::warn!(expected = chain.chain_id, actual = chain_id, "node is on a different chain than the preset");
    }

    let session = match preset.filter(|c| c.chain_id == chain_id) {
        Some(chain) => Session::new(provider.account(), chain_id, chain.name).with_symbol(chain.symbol),
        None => Session::new(provider.account(), chain_id, data::chains::chain_name(chain_id)),
    };
    tracing::info!(
        chain_id,
        account = ?session.account,
        contract = %config.contract,
        "connected"
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let contract = TicketContract::new(provider, config.contract);
    let service = TicketService::new(contract, event_tx);

    let start = View::from_path(&config.route).unwrap_or_else(|| {
        tracing::warn!(route = %config.route, "unknown start route, opening the booking page");
        View::Booking
    });

    let mut app = App::new(
        service,
        event_rx,
        session,
        config.seat_price,
        BotCheck::new(config.bot_check_site_key.clone()),
        config.tick_rate_ms,
    );

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal, start).await;

    // Restore terminal
    ratatui::restore();

    result
}
