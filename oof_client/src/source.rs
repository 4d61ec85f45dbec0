//! Fetching raw quote payloads from the upstream service.
//!
//! `QuoteSource` is the network seam of the poller: the HTTP implementation
//! issues one blocking GET per poll cycle and hands back the undecoded bytes.
use std::time::Duration;

use log::debug;
use oof_common::net;
use oof_common::{OofError, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};

/// Something that can fetch the raw payload behind a quote URL.
#[cfg_attr(test, mockall::automock)]
pub trait QuoteSource {
    /// Fetch `url` and return the response body.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP source with the headers the upstream expects.
pub struct HttpQuoteSource {
    client: Client,
}

impl HttpQuoteSource {
    /// Build the underlying client.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(net::USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static(net::REFERER));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(net::REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(OofError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}
