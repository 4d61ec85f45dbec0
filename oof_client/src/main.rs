//! oof — a console stock-quote viewer for Shanghai and Shenzhen A-shares.
//!
//! `show` polls the quote service for a batch of ticker codes and redraws a
//! table every few seconds until Ctrl+C. `cart` manages a saved list of codes
//! so that a bare `oof show` polls them.
//!
//! Usage example (CLI):
//! ```bash
//! oof show 600000 000002 --interval-ms 2000
//! oof cart --add 300750 --list
//! oof show
//! ```
//!
//! The cart lives in `~/.oof/config`. See `oof_common::cart` for its format.
#![warn(missing_docs)]
mod args;
mod commands;
mod poller;
mod prompt;
mod render;
mod shutdown;
mod source;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use oof_common::{OofError, Result};

use crate::args::{Args, Command};
use crate::poller::Poller;
use crate::shutdown::{ShutdownToken, shutdown_channel};
use crate::source::HttpQuoteSource;

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();
    let result = run(args);
    if let Err(e) = &result {
        error!("{}", e);
    }
    exit_code(&result)
}

// Only a missing home directory fails the process; every other error has
// already been reported and ends the invocation normally.
fn exit_code(result: &Result<()>) -> ExitCode {
    match result {
        Err(e) if e.is_fatal() => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn run(args: Args) -> Result<()> {
    let store = commands::resolve_store(args.config)?;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Cart(cart) => commands::run_cart(&cart, &store, &mut out),
        Command::Show(show) => {
            let poller = Poller::new(HttpQuoteSource::new()?, args.host);
            let mut input = io::stdin().lock();
            commands::run_show(&show, &store, &poller, arm_shutdown, &mut input, &mut out)
        }
    }
}

// Installed only once polling starts, so Ctrl+C at the save prompt still
// terminates the process before the cart is written.
fn arm_shutdown() -> Result<ShutdownToken> {
    let (mut trigger, token) = shutdown_channel();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping...");
        trigger.cancel();
    })
    .map_err(|e| OofError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;
    Ok(token)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
