//! The quote refresh loop.
//!
//! A poll cycle fetches one payload for all codes of a validated batch,
//! decodes it, and renders the table. `Poller::poll_loop` repeats cycles at a
//! fixed delay until the shutdown token fires. A failed cycle is logged and the
//! next one runs on schedule; there is no backoff.
use std::io::Write;
use std::time::Duration;

use chrono::Local;
use log::{debug, error, info};
use oof_common::net::batch_url;
use oof_common::quote::{decode_payload, parse_response};
use oof_common::{QuoteRecord, Result, TickerCode};

use crate::render::render;
use crate::shutdown::ShutdownToken;
use crate::source::QuoteSource;

/// Drives fetch and render against a [`QuoteSource`].
pub struct Poller<S> {
    source: S,
    host: String,
}

impl<S: QuoteSource> Poller<S> {
    /// Poll `host` through `source`.
    pub fn new(source: S, host: impl Into<String>) -> Self {
        Self {
            source,
            host: host.into(),
        }
    }

    /// Fetch validated codes as one request. An empty batch makes no request.
    pub fn fetch_codes(&self, codes: &[TickerCode]) -> Result<Vec<QuoteRecord>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let url = batch_url(&self.host, codes);
        let bytes = self.source.fetch(&url)?;
        let text = decode_payload(&bytes);
        Ok(parse_response(&text))
    }

    /// One fetch and render. Returns the number of rows drawn.
    pub fn poll_cycle<W: Write>(&self, codes: &[TickerCode], out: &mut W) -> Result<usize> {
        let records = self.fetch_codes(codes)?;
        render(out, &records, Local::now())?;
        Ok(records.len())
    }

    /// Run poll cycles every `interval` until `shutdown` is cancelled.
    pub fn poll_loop<W: Write>(
        &self,
        codes: &[TickerCode],
        interval: Duration,
        shutdown: &ShutdownToken,
        out: &mut W,
    ) -> Result<()> {
        let mut cycles = 0u64;
        while !shutdown.is_cancelled() {
            cycles += 1;
            match self.poll_cycle(codes, out) {
                Ok(rows) => debug!("Cycle {} rendered {} rows", cycles, rows),
                Err(e) => error!("Cycle {} failed: {}", cycles, e),
            }
            if shutdown.wait(interval) {
                break;
            }
        }
        info!("Polling stopped after {} cycles", cycles);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::shutdown_channel;
    use crate::source::MockQuoteSource;
    use encoding_rs::GB18030;
    use mockall::predicate::eq;
    use oof_common::OofError;
    use pretty_assertions::assert_eq;

    const HOST: &str = "quotes.test";

    fn payload(text: &str) -> Vec<u8> {
        GB18030.encode(text).0.into_owned()
    }

    fn codes(raw: &[&str]) -> Vec<TickerCode> {
        TickerCode::parse_batch(raw).unwrap()
    }

    #[test]
    fn empty_batch_makes_no_request() {
        let mut source = MockQuoteSource::new();
        source.expect_fetch().times(0);
        let poller = Poller::new(source, HOST);

        let records = poller.fetch_codes(&[]).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn batch_is_one_request() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch()
            .with(eq("http://quotes.test/list=sh600000,sz000002"))
            .times(1)
            .returning(|_| {
                Ok(payload(
                    "var hq_str_sh600000=\"浦发银行,7.10,7.00,6.93,7.12,6.90,6.92,6.93,123456,876543.21\";\n\
                     var hq_str_sz000002=\"万科Ａ,10.00,9.50,9.80,10.10,9.40,9.79,9.81,1000,9800\";\n",
                ))
            });
        let poller = Poller::new(source, HOST);

        let records = poller.fetch_codes(&codes(&["600000", "000002"])).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.to_string(), "浦发银行");
        assert_eq!(records[1].name.to_string(), "万科Ａ");
        assert_eq!(records[1].percent_change(), Some(3.16));
    }

    #[test]
    fn fetch_error_propagates_from_cycle() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Err(OofError::Status(503)));
        let poller = Poller::new(source, HOST);
        let mut out: Vec<u8> = Vec::new();

        let err = poller.poll_cycle(&codes(&["600000"]), &mut out).unwrap_err();

        assert!(matches!(err, OofError::Status(503)));
        assert!(out.is_empty());
    }

    #[test]
    fn cancelled_token_runs_no_cycles() {
        let mut source = MockQuoteSource::new();
        source.expect_fetch().times(0);
        let poller = Poller::new(source, HOST);
        let (mut trigger, token) = shutdown_channel();
        trigger.cancel();
        let mut out: Vec<u8> = Vec::new();

        poller
            .poll_loop(&codes(&["600000"]), Duration::from_secs(60), &token, &mut out)
            .unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn loop_stops_after_cancel_mid_cycle() {
        let (trigger, token) = shutdown_channel();
        let mut trigger = Some(trigger);
        let mut source = MockQuoteSource::new();
        source.expect_fetch().times(1).returning(move |_| {
            if let Some(mut t) = trigger.take() {
                t.cancel();
            }
            Ok(payload("var hq_str_sh600000=\"浦发银行,7.10,7.00,6.93,7.12,6.90,6.92,6.93,1,1\";"))
        });
        let poller = Poller::new(source, HOST);
        let mut out: Vec<u8> = Vec::new();

        poller
            .poll_loop(&codes(&["600000"]), Duration::from_secs(60), &token, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("浦发银行"));
    }

    #[test]
    fn failed_cycle_does_not_end_loop() {
        let (trigger, token) = shutdown_channel();
        let mut trigger = Some(trigger);
        let mut calls = 0;
        let mut source = MockQuoteSource::new();
        source.expect_fetch().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                return Err(OofError::Status(502));
            }
            if let Some(mut t) = trigger.take() {
                t.cancel();
            }
            Ok(payload(""))
        });
        let poller = Poller::new(source, HOST);
        let mut out: Vec<u8> = Vec::new();

        poller
            .poll_loop(&codes(&["000002"]), Duration::from_millis(1), &token, &mut out)
            .unwrap();

        assert!(String::from_utf8(out).unwrap().contains("Updated:"));
    }
}
