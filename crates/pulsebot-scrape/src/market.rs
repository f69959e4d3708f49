//! Stockbee Market Monitor scraper.
//!
//! The sheet mixes header and commentary rows with data rows; data rows
//! are recognized by a `M/D/YYYY` date in the first cell.

use regex::Regex;
use tracing::info;

use pulsebot_types::{BreadthData, BreadthRow};

use crate::{FetchError, csv, export_url, http_client};

const SHEET_ID: &str = "1O6OhS7ciA8zwfycBfGPbP2fWJnR0pn2UUvFZVDP9jpE";
const SHEET_GID: &str = "1082103394";

/// Fetcher for the Market Monitor sheet.
pub struct MarketMonitor {
    client: reqwest::Client,
    url: String,
}

impl MarketMonitor {
    pub fn new() -> Self {
        Self {
            client: http_client(),
            url: export_url(SHEET_ID, SHEET_GID),
        }
    }

    /// Fetch and parse the sheet, newest row first.
    pub async fn fetch(&self) -> Result<BreadthData, FetchError> {
        let text = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let data = parse_sheet(&text)?;
        info!(rows = data.rows.len(), "market monitor fetched");
        Ok(data)
    }
}

impl Default for MarketMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the CSV export into breadth rows.
pub fn parse_sheet(text: &str) -> Result<BreadthData, FetchError> {
    let date_re = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").expect("static regex");

    let rows: Vec<BreadthRow> = csv::parse(text)
        .into_iter()
        .filter_map(|cells| parse_row(&cells, &date_re))
        .collect();

    if rows.is_empty() {
        return Err(FetchError::Empty("market monitor"));
    }
    Ok(BreadthData { rows })
}

fn parse_row(cells: &[String], date_re: &Regex) -> Option<BreadthRow> {
    if cells.len() < 7 {
        return None;
    }
    let date = cells[0].trim();
    if !date_re.is_match(date) {
        return None;
    }
    Some(BreadthRow {
        date: date.to_string(),
        up_4pct: parse_int(&cells[1]),
        down_4pct: parse_int(&cells[2]),
        ratio_5d: parse_float(&cells[3]),
        ratio_10d: parse_float(&cells[4]),
        up_25pct_qtr: parse_int(&cells[5]),
        down_25pct_qtr: parse_int(&cells[6]),
    })
}

/// Parse an integer cell, tolerating comma grouping and junk (-> 0).
fn parse_int(s: &str) -> i64 {
    s.replace(',', "").trim().parse().unwrap_or(0)
}

fn parse_float(s: &str) -> f64 {
    s.replace(',', "").trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Market Monitor,,,,,,\n\
Date,Up 4%,Down 4%,5 Day,10 Day,25% Qtr Up,25% Qtr Down\n\
2/3/2026,321,531,0.59,0.96,612,404\n\
2/2/2026,\"1,274\",200,0.69,0.96,640,398\n\
notes row,,,,,,\n";

    #[test]
    fn test_parse_sheet() {
        let data = parse_sheet(SAMPLE).unwrap();
        assert_eq!(data.rows.len(), 2);
        let latest = data.latest().unwrap();
        assert_eq!(latest.date, "2/3/2026");
        assert_eq!(latest.up_4pct, 321);
        assert_eq!(latest.down_4pct, 531);
        assert_eq!(latest.ratio_5d, 0.59);
        assert_eq!(latest.up_25pct_qtr, 612);
    }

    #[test]
    fn test_parse_comma_grouped_int() {
        let data = parse_sheet(SAMPLE).unwrap();
        assert_eq!(data.rows[1].up_4pct, 1274);
    }

    #[test]
    fn test_parse_empty_sheet_is_error() {
        let err = parse_sheet("Header,only\nno,data\n").unwrap_err();
        assert!(matches!(err, FetchError::Empty(_)));
    }

    #[test]
    fn test_junk_cells_default_to_zero() {
        let text = "2/3/2026,N/A,x,,,,\n";
        let data = parse_sheet(text).unwrap();
        assert_eq!(data.rows[0].up_4pct, 0);
        assert_eq!(data.rows[0].ratio_5d, 0.0);
    }
}
