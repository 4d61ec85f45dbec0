//! Quote records decoded from the upstream text payload.
//!
//! The upstream answers a batched query with one statement per ticker:
//!
//! ```text
//! var hq_str_sz000002="Vanke A,10.00,9.50,9.80,10.10,9.40,9.79,9.81,1000,9800,...";
//! ```
//!
//! Statements are separated by `;`. The quoted value list is split on `,` and
//! the first ten positions are mapped by [`QuoteField`]. Values that parse as
//! numbers become [`FieldValue::Number`], anything else stays text.

use std::fmt;

use encoding_rs::GB18030;
use log::warn;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Separator between per-ticker statements.
pub const RECORD_SEPARATOR: char = ';';
/// Separator between values of one statement.
pub const VALUE_SEPARATOR: char = ',';
/// Marker preceding the query key of a statement.
const KEY_MARKER: &str = "hq_str_";

/// Positional columns of a quote statement, in upstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum QuoteField {
    /// Company short name.
    #[strum(serialize = "Name")]
    Name,
    /// Today's opening price.
    #[strum(serialize = "Open")]
    Open,
    /// Previous session close.
    #[strum(serialize = "Prev Close")]
    PrevClose,
    /// Latest price.
    #[strum(serialize = "Price")]
    Current,
    /// Today's high.
    #[strum(serialize = "High")]
    High,
    /// Today's low.
    #[strum(serialize = "Low")]
    Low,
    /// Best bid.
    #[strum(serialize = "Bid")]
    Bid,
    /// Best ask.
    #[strum(serialize = "Ask")]
    Ask,
    /// Traded shares.
    #[strum(serialize = "Volume")]
    Volume,
    /// Traded amount in yuan.
    #[strum(serialize = "Turnover")]
    Turnover,
}

impl QuoteField {
    /// Index of the field inside the comma-separated value list.
    pub fn position(self) -> usize {
        self as usize
    }
}

/// A single decoded value: numeric when it parses as a finite number.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric value.
    Number(f64),
    /// Anything that is not a number, including missing positions (empty text).
    Text(String),
}

impl FieldValue {
    /// Coerce raw upstream text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Text(String::new());
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Text(trimmed.to_string()),
        }
    }

    /// Numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One ticker's quote for the current poll cycle.
///
/// Field meanings follow [`QuoteField`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRecord {
    /// Upstream query key (e.g. `sz000002`), empty when the statement had none.
    pub key: String,
    pub name: FieldValue,
    pub open: FieldValue,
    pub prev_close: FieldValue,
    pub current: FieldValue,
    pub high: FieldValue,
    pub low: FieldValue,
    pub bid: FieldValue,
    pub ask: FieldValue,
    pub volume: FieldValue,
    pub turnover: FieldValue,
}

impl QuoteRecord {
    /// Map a comma-separated value list positionally onto the ten fields.
    pub fn from_values(key: &str, list: &str) -> Self {
        let values: Vec<&str> = list.split(VALUE_SEPARATOR).collect();
        let at = |field: QuoteField| FieldValue::parse(values.get(field.position()).unwrap_or(&""));
        QuoteRecord {
            key: key.to_string(),
            name: at(QuoteField::Name),
            open: at(QuoteField::Open),
            prev_close: at(QuoteField::PrevClose),
            current: at(QuoteField::Current),
            high: at(QuoteField::High),
            low: at(QuoteField::Low),
            bid: at(QuoteField::Bid),
            ask: at(QuoteField::Ask),
            volume: at(QuoteField::Volume),
            turnover: at(QuoteField::Turnover),
        }
    }

    /// Value of a positional field.
    pub fn field(&self, field: QuoteField) -> &FieldValue {
        match field {
            QuoteField::Name => &self.name,
            QuoteField::Open => &self.open,
            QuoteField::PrevClose => &self.prev_close,
            QuoteField::Current => &self.current,
            QuoteField::High => &self.high,
            QuoteField::Low => &self.low,
            QuoteField::Bid => &self.bid,
            QuoteField::Ask => &self.ask,
            QuoteField::Volume => &self.volume,
            QuoteField::Turnover => &self.turnover,
        }
    }

    /// All positional fields in upstream order.
    pub fn fields(&self) -> impl Iterator<Item = (QuoteField, &FieldValue)> {
        QuoteField::iter().map(move |f| (f, self.field(f)))
    }

    /// `(current - prev_close) / prev_close * 100`, rounded to two decimals.
    ///
    /// `None` when either price is not numeric or the previous close is zero.
    pub fn percent_change(&self) -> Option<f64> {
        let current = self.current.as_number()?;
        let prev = self.prev_close.as_number()?;
        if prev == 0.0 {
            return None;
        }
        Some(round2((current - prev) / prev * 100.0))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Decode raw response bytes. The upstream always answers in GB18030.
pub fn decode_payload(bytes: &[u8]) -> String {
    let (text, _, had_errors) = GB18030.decode(bytes);
    if had_errors {
        warn!("Quote payload contained bytes invalid in GB18030");
    }
    text.into_owned()
}

/// Decode one statement, e.g. `var hq_str_sh600000="..."`.
///
/// Returns `None` for segments without a quoted value list.
pub fn parse_segment(segment: &str) -> Option<QuoteRecord> {
    let start = segment.find('"')?;
    let end = segment.rfind('"')?;
    if end <= start {
        return None;
    }
    let key = segment[..start]
        .split_once(KEY_MARKER)
        .map(|(_, rest)| rest.trim_end_matches('=').trim())
        .unwrap_or("");
    Some(QuoteRecord::from_values(key, &segment[start + 1..end]))
}

/// Split a decoded payload into one record per ticker statement.
pub fn parse_response(text: &str) -> Vec<QuoteRecord> {
    text.split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_segment)
        .collect()
}
