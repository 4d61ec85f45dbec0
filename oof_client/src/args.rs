//! Command-line arguments for `oof`.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use oof_common::net::{DEFAULT_HOST, DEFAULT_INTERVAL_MS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "oof", version, about, long_about = None)]
pub struct Args {
    /// Host of the quote service.
    #[arg(long, global = true, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Path of the cart document. Defaults to `~/.oof/config`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll quotes for the given codes, or for the saved cart when none are given.
    Show(ShowArgs),
    /// List, add, or delete saved codes.
    Cart(CartArgs),
}

/// Arguments of `oof show`.
#[derive(Debug, ClapArgs)]
pub struct ShowArgs {
    /// Ticker codes, separated by spaces or commas.
    pub codes: Vec<String>,

    /// Delay between refreshes in milliseconds.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Add the given codes to the cart without asking.
    #[arg(long, conflicts_with = "no_save")]
    pub save: bool,

    /// Never add the given codes to the cart.
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments of `oof cart`. Listing is the default when no flag is given.
#[derive(Debug, ClapArgs)]
pub struct CartArgs {
    /// Print the saved codes.
    #[arg(short, long)]
    pub list: bool,

    /// Codes to add.
    #[arg(short, long, num_args = 1..)]
    pub add: Vec<String>,

    /// Codes to delete.
    #[arg(short, long, num_args = 1..)]
    pub delete: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn show_defaults() {
        let args = Args::parse_from(["oof", "show", "600000", "000002,300750"]);
        assert_eq!(args.host, DEFAULT_HOST);
        match args.command {
            Command::Show(show) => {
                assert_eq!(show.codes, vec!["600000", "000002,300750"]);
                assert_eq!(show.interval_ms, DEFAULT_INTERVAL_MS);
                assert!(!show.save && !show.no_save);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cart_flags() {
        let args = Args::parse_from(["oof", "cart", "--add", "600000", "000002", "-d", "300750"]);
        match args.command {
            Command::Cart(cart) => {
                assert_eq!(cart.add, vec!["600000", "000002"]);
                assert_eq!(cart.delete, vec!["300750"]);
                assert!(!cart.list);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn save_flags_conflict() {
        assert!(Args::try_parse_from(["oof", "show", "--save", "--no-save"]).is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Args::try_parse_from(["oof", "show", "600000", "--interval-ms", "0"]).is_err());
        let args = Args::parse_from(["oof", "show", "--interval-ms", "1"]);
        match args.command {
            Command::Show(show) => assert_eq!(show.interval_ms, 1),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_config_after_subcommand() {
        let args = Args::parse_from(["oof", "cart", "--config", "/tmp/oof.json"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/oof.json")));
    }
}
