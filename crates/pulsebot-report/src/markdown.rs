//! Markdown document generation (Obsidian-friendly frontmatter).

use std::collections::HashMap;

use chrono::NaiveDateTime;

use pulsebot_types::{BreadthData, MomentumBoard};

const MARKET_MONITOR_URL: &str = "https://stockbee.blogspot.com/p/mm.html";
const MOMENTUM_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1xjbe9SF0HsxwY_Uy3NC2tT92BqK0nhArUaYU16Q0p9M";

/// Render the daily Market Monitor document.
pub fn market_monitor(data: &BreadthData, analysis: &str, now: NaiveDateTime) -> String {
    let date = now.format("%Y-%m-%d");
    let time = now.format("%H:%M");

    let mut table = String::new();
    for row in data.rows.iter().take(10) {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.date, row.up_4pct, row.down_4pct, row.ratio_5d, row.ratio_10d
        ));
    }
    if table.is_empty() {
        table.push_str("| no data |\n");
    }

    format!(
        "---\n\
         title: Market Monitor {date}\n\
         date: {date}\n\
         time: {time}\n\
         type: daily-push\n\
         source: stockbee\n\
         tags:\n\
         \x20 - market-breadth\n\
         \x20 - daily-monitor\n\
         ---\n\
         \n\
         # Market Monitor {date}\n\
         \n\
         > Updated: {time}\n\
         > Source: [Stockbee Market Monitor]({MARKET_MONITOR_URL})\n\
         \n\
         ## Data\n\
         \n\
         | Date | Up 4%+ | Down 4%+ | 5-day | 10-day |\n\
         |------|--------|----------|-------|--------|\n\
         {table}\
         \n\
         ## Analysis\n\
         \n\
         {analysis}\n\
         \n\
         ## Indicator notes\n\
         \n\
         - **Up/Down 4%+**: stocks moving more than 4% on the day\n\
         - **5/10-day ratio**: advance/decline ratio, above 1 bullish, below 1 bearish\n\
         - **Extremes**: daily up 4%+ above 500 or below 50 often precedes reversals\n"
    )
}

/// Render the daily Momentum 50 document.
pub fn momentum(
    board: &MomentumBoard,
    analysis: &str,
    descriptions: &HashMap<String, String>,
    now: NaiveDateTime,
) -> String {
    let date = now.format("%Y-%m-%d");
    let time = now.format("%H:%M");

    let mut table = String::new();
    for (i, ticker) in board.tickers.iter().enumerate() {
        let desc = descriptions.get(ticker).map(String::as_str).unwrap_or("-");
        let flag = if board.new_entries.contains(ticker) { " 🆕" } else { "" };
        table.push_str(&format!("| {} | {ticker}{flag} | {desc} |\n", i + 1));
    }
    if table.is_empty() {
        table.push_str("| no data |\n");
    }

    let new_section = if board.new_entries.is_empty() {
        "no new entries today".to_string()
    } else {
        board
            .new_entries
            .iter()
            .take(10)
            .map(|t| {
                let desc = descriptions.get(t).map(String::as_str).unwrap_or("");
                format!("- **{t}**: {desc}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let dropped_section = if board.dropped.is_empty() {
        "none".to_string()
    } else {
        board.dropped.iter().take(10).cloned().collect::<Vec<_>>().join(", ")
    };

    let tv_list = tradingview_watchlist(&board.tickers);

    format!(
        "---\n\
         title: Momentum 50 {date}\n\
         date: {date}\n\
         time: {time}\n\
         type: daily-push\n\
         source: stockbee\n\
         tags:\n\
         \x20 - momentum\n\
         \x20 - watchlist\n\
         \x20 - daily-monitor\n\
         ---\n\
         \n\
         # Momentum 50 {date}\n\
         \n\
         > Updated: {time}\n\
         > Source: [Stockbee Momentum 50]({MOMENTUM_SHEET_URL})\n\
         \n\
         ## Analysis\n\
         \n\
         {analysis}\n\
         \n\
         ## New on the board 🆕\n\
         \n\
         {new_section}\n\
         \n\
         ## Dropped off\n\
         \n\
         {dropped_section}\n\
         \n\
         ## Full board\n\
         \n\
         | # | Ticker | Business |\n\
         |---|--------|----------|\n\
         {table}\
         \n\
         ## TradingView watchlist\n\
         \n\
         ```\n\
         {tv_list}\n\
         ```\n"
    )
}

/// Comma list importable as a TradingView watchlist.
pub fn tradingview_watchlist(tickers: &[String]) -> String {
    tickers
        .iter()
        .map(|t| format!("NASDAQ:{t}"))
        .collect::<Vec<_>>()
        .join(",")
}
