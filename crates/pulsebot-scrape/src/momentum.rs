//! Stockbee Momentum 50 scraper.
//!
//! Layout: the first row holds dates (newest in column 0), and each
//! column below it is that day's ranked ticker list.

use std::collections::HashSet;

use tracing::info;

use pulsebot_types::MomentumBoard;

use crate::{FetchError, csv, export_url, http_client};

const SHEET_ID: &str = "1xjbe9SF0HsxwY_Uy3NC2tT92BqK0nhArUaYU16Q0p9M";
const SHEET_GID: &str = "1499398020";

/// Board depth; rows past this are footnotes.
const BOARD_SIZE: usize = 50;

/// Fetcher for the Momentum 50 sheet.
pub struct Momentum50 {
    client: reqwest::Client,
    url: String,
}

impl Momentum50 {
    pub fn new() -> Self {
        Self {
            client: http_client(),
            url: export_url(SHEET_ID, SHEET_GID),
        }
    }

    /// Fetch and parse the latest board with day-over-day changes.
    pub async fn fetch(&self) -> Result<MomentumBoard, FetchError> {
        let text = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let board = parse_sheet(&text)?;
        info!(
            date = %board.latest_date,
            tickers = board.tickers.len(),
            new = board.new_entries.len(),
            "momentum 50 fetched"
        );
        Ok(board)
    }
}

impl Default for Momentum50 {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the CSV export into the latest board.
pub fn parse_sheet(text: &str) -> Result<MomentumBoard, FetchError> {
    let rows = csv::parse(text);
    if rows.len() < 2 {
        return Err(FetchError::Empty("momentum 50"));
    }

    let dates = &rows[0];
    let latest_date = dates
        .first()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or(FetchError::Empty("momentum 50"))?;

    let tickers = column_tickers(&rows, 0);
    if tickers.is_empty() {
        return Err(FetchError::Empty("momentum 50"));
    }

    // Compare against the previous day's column when one exists.
    let (new_entries, dropped) = if dates.len() >= 2 && !dates[1].trim().is_empty() {
        let prev_list = column_tickers(&rows, 1);
        let prev: HashSet<&str> = prev_list.iter().map(String::as_str).collect();
        let curr: HashSet<&str> = tickers.iter().map(String::as_str).collect();
        let mut new_entries: Vec<String> =
            curr.difference(&prev).map(|t| t.to_string()).collect();
        let mut dropped: Vec<String> =
            prev.difference(&curr).map(|t| t.to_string()).collect();
        new_entries.sort();
        dropped.sort();
        (new_entries, dropped)
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(MomentumBoard {
        latest_date,
        tickers,
        new_entries,
        dropped,
    })
}

fn column_tickers(rows: &[Vec<String>], col: usize) -> Vec<String> {
    rows.iter()
        .skip(1)
        .take(BOARD_SIZE)
        .filter_map(|row| row.get(col))
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
02/03/2026,02/02/2026\n\
ANL,TCGL\n\
GITS,ANL\n\
AZN,GITS\n\
,\n";

    #[test]
    fn test_parse_board() {
        let board = parse_sheet(SAMPLE).unwrap();
        assert_eq!(board.latest_date, "02/03/2026");
        assert_eq!(board.tickers, vec!["ANL", "GITS", "AZN"]);
    }

    #[test]
    fn test_day_over_day_changes() {
        let board = parse_sheet(SAMPLE).unwrap();
        assert_eq!(board.new_entries, vec!["AZN"]);
        assert_eq!(board.dropped, vec!["TCGL"]);
    }

    #[test]
    fn test_single_column_has_no_changes() {
        let board = parse_sheet("02/03/2026\nANL\nGITS\n").unwrap();
        assert!(board.new_entries.is_empty());
        assert!(board.dropped.is_empty());
    }

    #[test]
    fn test_lowercase_tickers_normalized() {
        let board = parse_sheet("02/03/2026\nanl\n").unwrap();
        assert_eq!(board.tickers, vec!["ANL"]);
    }

    #[test]
    fn test_empty_sheet_is_error() {
        assert!(matches!(
            parse_sheet("").unwrap_err(),
            FetchError::Empty(_)
        ));
        assert!(matches!(
            parse_sheet("02/03/2026\n").unwrap_err(),
            FetchError::Empty(_)
        ));
    }
}
