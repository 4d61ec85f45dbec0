//! The `show` and `cart` subcommands.
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use log::{error, info};
use oof_common::ticker::split_codes;
use oof_common::{CartConfig, ConfigStore, Result, TickerCode};

use crate::args::{CartArgs, ShowArgs};
use crate::poller::Poller;
use crate::prompt::confirm;
use crate::render::render;
use crate::shutdown::ShutdownToken;
use crate::source::QuoteSource;

/// Cart store at `path`, or at `~/.oof/config` when none is given.
pub fn resolve_store(path: Option<PathBuf>) -> Result<ConfigStore> {
    match path {
        Some(path) => Ok(ConfigStore::new(path)),
        None => ConfigStore::from_home(),
    }
}

/// Poll the given codes, or the saved cart when none are given.
///
/// Invalid codes abort before anything is saved or fetched. With nothing to
/// show, a single empty table is drawn and the command returns.
///
/// `arm_shutdown` is called only once the save question is answered, so Ctrl+C
/// keeps its default behaviour while the prompt waits for input.
pub fn run_show<S, R, W, A>(
    args: &ShowArgs,
    store: &ConfigStore,
    poller: &Poller<S>,
    arm_shutdown: A,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: QuoteSource,
    R: BufRead,
    W: Write,
    A: FnOnce() -> Result<ShutdownToken>,
{
    let raw = split_codes(&args.codes);
    let codes = if raw.is_empty() {
        store.load_or_default().codes().to_vec()
    } else {
        let codes = TickerCode::parse_batch(&raw)?;
        if wants_save(args, input, out)? {
            let mut config = store.load_or_default();
            let added = config.add(codes.iter().cloned());
            info!("Added {} code(s) to cart", added);
            if added > 0 {
                persist(store, &config);
            }
        }
        codes
    };

    if codes.is_empty() {
        info!("Nothing to show: pass codes or add some to the cart");
        render(out, &[], Local::now())?;
        return Ok(());
    }

    let shutdown = arm_shutdown()?;
    info!("Polling {} code(s) every {} ms", codes.len(), args.interval_ms);
    poller.poll_loop(&codes, Duration::from_millis(args.interval_ms), &shutdown, out)
}

fn wants_save<R: BufRead, W: Write>(args: &ShowArgs, input: &mut R, out: &mut W) -> Result<bool> {
    if args.save {
        return Ok(true);
    }
    if args.no_save {
        return Ok(false);
    }
    confirm(input, out, "Add these codes to the cart?")
}

/// Add, delete, and list saved codes.
///
/// All given codes are validated before the cart is touched. Listing is the
/// default when neither `--add` nor `--delete` is given.
pub fn run_cart<W: Write>(args: &CartArgs, store: &ConfigStore, out: &mut W) -> Result<()> {
    let add = TickerCode::parse_batch(split_codes(&args.add))?;
    let delete = TickerCode::parse_batch(split_codes(&args.delete))?;
    let mutating = !add.is_empty() || !delete.is_empty();

    let mut config = store.load_or_default();
    if !add.is_empty() {
        let added = config.add(add);
        info!("Added {} code(s) to cart", added);
    }
    if !delete.is_empty() {
        let removed = config.remove(&delete);
        info!("Deleted {} code(s) from cart", removed);
    }
    if mutating {
        persist(store, &config);
    }

    if args.list || !mutating {
        list_cart(out, &config)?;
    }
    Ok(())
}

// Save failures are not fatal: the in-memory cart stays usable for this run.
fn persist(store: &ConfigStore, config: &CartConfig) {
    if let Err(e) = store.save(config) {
        error!("Failed to save cart to {}: {}", store.path().display(), e);
    }
}

fn list_cart<W: Write>(out: &mut W, config: &CartConfig) -> Result<()> {
    if config.is_empty() {
        writeln!(out, "Cart is empty.")?;
        return Ok(());
    }
    for code in config.codes() {
        writeln!(out, "{}  {}", code, code.exchange())?;
    }
    Ok(())
}
