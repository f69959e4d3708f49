//! Scrapers for the two Stockbee data sources.
//!
//! Both sources are published as Google Sheets and fetched through the
//! CSV export endpoint, which is far more stable than the rendered pages.

pub mod csv;
pub mod market;
pub mod momentum;

pub use market::MarketMonitor;
pub use momentum::Momentum50;

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no parsable rows in {0} sheet")]
    Empty(&'static str),
}

/// Sheets occasionally serve an interstitial to clientless agents;
/// a desktop UA avoids it.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("failed to build reqwest client")
}

pub(crate) fn export_url(sheet_id: &str, gid: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}")
}
