//! Upstream quote service constants and URL helpers.

use crate::ticker::TickerCode;

/// Default host of the quote service.
pub const DEFAULT_HOST: &str = "hq.sinajs.cn";
/// Referer the upstream requires before it serves quotes.
pub const REFERER: &str = "https://finance.sina.com.cn";
/// Browser user agent sent with every quote request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// Request timeout for a single poll cycle.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Delay between poll cycles when none is given on the command line.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Build the batched query URL, e.g. `http://hq.sinajs.cn/list=sh600000,sz000002`.
pub fn batch_url(host: &str, codes: &[TickerCode]) -> String {
    let keys: Vec<String> = codes.iter().map(TickerCode::query_key).collect();
    format!("http://{}/list={}", host, keys.join(","))
}
