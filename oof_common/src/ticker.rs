//! Ticker codes of the two supported A-share exchanges.
//!
//! A code is valid iff it matches one of the rules in [`EXCHANGE_RULES`]:
//! Shanghai `60` + 4 digits, Shenzhen `300|002|000` + 3 digits. The exchange
//! decides the two-letter prefix used in upstream query keys (`sh600000`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::OofError;

/// Exchange a ticker code is listed on. Displays as its query prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Exchange {
    /// Shanghai Stock Exchange.
    Sh,
    /// Shenzhen Stock Exchange.
    Sz,
}

/// One exchange pattern: a fixed leading prefix followed by digits up to
/// [`CODE_LEN`] characters.
#[derive(Debug)]
pub struct ExchangeRule {
    /// Exchange matched by this rule.
    pub exchange: Exchange,
    /// Accepted leading digit groups.
    pub leads: &'static [&'static str],
}

/// Length of every supported ticker code.
pub const CODE_LEN: usize = 6;

/// Exchange rules in match order. Shanghai comes first; the patterns are disjoint.
pub static EXCHANGE_RULES: [ExchangeRule; 2] = [
    ExchangeRule {
        exchange: Exchange::Sh,
        leads: &["60"],
    },
    ExchangeRule {
        exchange: Exchange::Sz,
        leads: &["300", "002", "000"],
    },
];

impl ExchangeRule {
    fn matches(&self, code: &str) -> bool {
        code.len() == CODE_LEN
            && code.bytes().all(|b| b.is_ascii_digit())
            && self.leads.iter().any(|lead| code.starts_with(lead))
    }
}

/// Resolve the exchange of `code`, or `None` when no rule matches.
pub fn validate(code: &str) -> Option<Exchange> {
    EXCHANGE_RULES
        .iter()
        .find(|rule| rule.matches(code))
        .map(|rule| rule.exchange)
}

/// Split raw user input into candidate codes.
///
/// Codes may be separated by commas or whitespace; blank pieces are dropped.
pub fn split_codes<I, S>(inputs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .flat_map(|input| {
            input
                .as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// A validated ticker code together with its exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerCode {
    code: String,
    exchange: Exchange,
}

impl TickerCode {
    /// Bare six-digit code.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Exchange derived from the code.
    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Upstream query key, e.g. `sz000002`.
    pub fn query_key(&self) -> String {
        format!("{}{}", self.exchange, self.code)
    }

    /// Validate every code of a batch. The first invalid code rejects the batch.
    pub fn parse_batch<I, S>(codes: I) -> Result<Vec<TickerCode>, OofError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().map(|c| c.as_ref().parse()).collect()
    }
}

impl FromStr for TickerCode {
    type Err = OofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        match validate(code) {
            Some(exchange) => Ok(TickerCode {
                code: code.to_string(),
                exchange,
            }),
            None => Err(OofError::InvalidCode(code.to_string())),
        }
    }
}

impl TryFrom<String> for TickerCode {
    type Error = OofError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TickerCode> for String {
    fn from(value: TickerCode) -> Self {
        value.code
    }
}

impl fmt::Display for TickerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
