//! Report rendering and persistence.
//!
//! One Markdown document per source per day, plus the compact Telegram
//! messages that announce them.

pub mod markdown;
pub mod store;
pub mod telegram;

/// Artifact category for Market Monitor reports.
pub const CATEGORY_MARKET_MONITOR: &str = "MarketMonitor";
/// Artifact category for Momentum 50 reports.
pub const CATEGORY_MOMENTUM: &str = "Momentum50";
