//! The persisted cart of favourite ticker codes.
//!
//! The cart lives in a single JSON document, `<home>/.oof/config`, shaped as
//! `{"cart": ["600000", ...]}`. It is read once at start-up and written back in
//! full after a mutation. Writes overwrite the file in place; there is no
//! locking and no atomic rename, so a crash mid-write may truncate the file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::error::OofError;
use crate::result::Result;
use crate::ticker::TickerCode;

/// Directory under the home directory holding the config document.
pub const CONFIG_DIR: &str = ".oof";
/// File name of the config document.
pub const CONFIG_FILE: &str = "config";

/// In-memory view of the config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Saved codes, unique, in insertion order.
    #[serde(default)]
    cart: Vec<TickerCode>,
}

impl CartConfig {
    /// Saved codes.
    pub fn codes(&self) -> &[TickerCode] {
        &self.cart
    }

    /// `true` when nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Union `codes` into the cart. Returns how many were new.
    pub fn add<I>(&mut self, codes: I) -> usize
    where
        I: IntoIterator<Item = TickerCode>,
    {
        let before = self.cart.len();
        for code in codes {
            if !self.cart.contains(&code) {
                self.cart.push(code);
            }
        }
        self.cart.len() - before
    }

    /// Drop every code in `codes`. Returns how many were removed.
    pub fn remove(&mut self, codes: &[TickerCode]) -> usize {
        let before = self.cart.len();
        self.cart.retain(|code| !codes.contains(code));
        before - self.cart.len()
    }
}

/// Reads and writes [`CartConfig`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<home>/.oof/config`.
    ///
    /// Fails with [`OofError::HomeNotFound`] when the home directory cannot be
    /// resolved or does not exist.
    pub fn from_home() -> Result<Self> {
        let dirs = BaseDirs::new().ok_or(OofError::HomeNotFound)?;
        let home = dirs.home_dir();
        if !home.is_dir() {
            return Err(OofError::HomeNotFound);
        }
        Ok(Self::new(home.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, creating it with an empty cart on first use.
    ///
    /// An existing but empty file reads as an empty cart.
    pub fn load(&self) -> Result<CartConfig> {
        if !self.path.exists() {
            debug!("Creating config at {}", self.path.display());
            let config = CartConfig::default();
            self.save(&config)?;
            return Ok(config);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(CartConfig::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Like [`ConfigStore::load`], but logs failures and falls back to an empty cart.
    pub fn load_or_default(&self) -> CartConfig {
        self.load().unwrap_or_else(|e| {
            error!("Failed to read cart from {}: {}", self.path.display(), e);
            CartConfig::default()
        })
    }

    /// Overwrite the document with `config`.
    pub fn save(&self, config: &CartConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
