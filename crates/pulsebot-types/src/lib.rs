use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ──────────────────── Market data ────────────────────

/// One day of Stockbee Market Monitor breadth readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthRow {
    /// Source date string as published (e.g. "2/3/2026").
    pub date: String,
    /// Stocks up more than 4% on the day.
    pub up_4pct: i64,
    /// Stocks down more than 4% on the day.
    pub down_4pct: i64,
    /// 5-day advance/decline ratio.
    pub ratio_5d: f64,
    /// 10-day advance/decline ratio.
    pub ratio_10d: f64,
    /// Stocks up more than 25% in a quarter.
    pub up_25pct_qtr: i64,
    /// Stocks down more than 25% in a quarter.
    pub down_25pct_qtr: i64,
}

/// Parsed Market Monitor sheet, newest row first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreadthData {
    pub rows: Vec<BreadthRow>,
}

impl BreadthData {
    /// The most recent reading.
    pub fn latest(&self) -> Option<&BreadthRow> {
        self.rows.first()
    }
}

/// Parsed Momentum 50 board for the latest published date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumBoard {
    /// Date string of the latest column (e.g. "02/03/2026").
    pub latest_date: String,
    /// Ranked tickers, best first (up to 50).
    pub tickers: Vec<String>,
    /// Tickers present today but not in the previous column.
    pub new_entries: Vec<String>,
    /// Tickers in the previous column but gone today.
    pub dropped: Vec<String>,
}

impl MomentumBoard {
    /// Share of the board that changed since the previous day, in percent.
    pub fn turnover_pct(&self) -> f64 {
        if self.tickers.is_empty() {
            return 0.0;
        }
        self.new_entries.len() as f64 / self.tickers.len() as f64 * 100.0
    }
}

// ──────────────────── Chat types ────────────────────

/// A text message received from the chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Chat the message arrived in (replies go back here).
    pub chat_id: i64,
    /// External user identifier.
    pub sender_id: i64,
    /// Display name, when the platform provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Message text content.
    pub text: String,
    /// Message timestamp (unix millis).
    pub timestamp: i64,
}

// ──────────────────── Scheduling ────────────────────

/// Snapshot of one scheduled job, as shown by `/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: String,
    /// Target local time-of-day, "HH:MM".
    pub at: String,
    /// IANA timezone the target time is evaluated in.
    pub timezone: String,
    /// Calendar date of the last firing, if any since process start.
    pub last_fired: Option<NaiveDate>,
}

/// Stable identifier of the Market Monitor push job.
pub const JOB_MARKET_MONITOR: &str = "market-monitor";
/// Stable identifier of the Momentum 50 push job.
pub const JOB_MOMENTUM: &str = "momentum50";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadth_row_serde() {
        let row = BreadthRow {
            date: "2/3/2026".into(),
            up_4pct: 321,
            down_4pct: 531,
            ratio_5d: 0.59,
            ratio_10d: 0.96,
            up_25pct_qtr: 612,
            down_25pct_qtr: 404,
        };
        let json = serde_json::to_string(&row).unwrap();
        let parsed: BreadthRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }

    #[test]
    fn test_breadth_latest() {
        let data = BreadthData { rows: vec![] };
        assert!(data.latest().is_none());
    }

    #[test]
    fn test_momentum_turnover() {
        let board = MomentumBoard {
            latest_date: "02/03/2026".into(),
            tickers: (0..50).map(|i| format!("T{i}")).collect(),
            new_entries: vec!["T0".into(), "T1".into(), "T2".into(), "T3".into(), "T4".into()],
            dropped: vec![],
        };
        assert_eq!(board.turnover_pct(), 10.0);
    }

    #[test]
    fn test_momentum_turnover_empty() {
        let board = MomentumBoard {
            latest_date: String::new(),
            tickers: vec![],
            new_entries: vec![],
            dropped: vec![],
        };
        assert_eq!(board.turnover_pct(), 0.0);
    }

    #[test]
    fn test_inbound_message_serde() {
        let msg = InboundMessage {
            chat_id: 42,
            sender_id: 7,
            sender_name: Some("Alice".into()),
            text: "/ping".into(),
            timestamp: 1700000000000,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: InboundMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.chat_id, 42);
        assert_eq!(parsed.text, "/ping");
    }
}
