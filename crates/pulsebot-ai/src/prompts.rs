//! Prompt builders for the scheduled analyses.
//!
//! The prompts pin the output format hard; mobile-width replies only.

use std::collections::HashMap;

use pulsebot_types::{BreadthRow, MomentumBoard};

/// Prompt for the daily market-breadth verdict.
pub fn market_breadth(row: &BreadthRow) -> String {
    format!(
        "Analyze this US market breadth data. Output the conclusion directly, no preamble.\n\
         \n\
         [Short-term] up 4%+: {up4} | down 4%+: {down4} | 5-day ratio: {r5} | 10-day ratio: {r10}\n\
         [Medium-term] quarter up 25%+: {upq} | quarter down 25%+: {downq}\n\
         \n\
         Output format (follow exactly, one line each, no trailing periods):\n\
         1. Short-term: [strong/weak/choppy] - [brief reason]\n\
         2. Medium-term: [strong/weak] - [brief judgement from quarterly data]\n\
         3. Signal: [none, or the specific extreme signal]\n\
         4. Stance: [wait/add/reduce] - [brief advice, under 15 words]\n\
         \n\
         Extreme signal rules:\n\
         - quarter up 25%+ below 350: bottoming zone\n\
         - daily up 4%+ above 1000 with 5-day ratio above 2: overheated",
        up4 = row.up_4pct,
        down4 = row.down_4pct,
        r5 = row.ratio_5d,
        r10 = row.ratio_10d,
        upq = row.up_25pct_qtr,
        downq = row.down_25pct_qtr,
    )
}

/// Prompt for the Momentum 50 board commentary.
pub fn momentum(board: &MomentumBoard) -> String {
    let top: Vec<&str> = board.tickers.iter().take(20).map(String::as_str).collect();
    let newcomers: Vec<&str> = board
        .new_entries
        .iter()
        .take(10)
        .map(String::as_str)
        .collect();
    let dropped: Vec<&str> = board.dropped.iter().take(10).map(String::as_str).collect();

    format!(
        "You are a momentum trading analyst. Analyze today's Momentum 50 board:\n\
         \n\
         Date: {date}\n\
         Top 20: {top}\n\
         New today: {newcomers}\n\
         Dropped today: {dropped}\n\
         \n\
         Give a concise phone-width analysis:\n\
         1. Sector mix: which sectors dominate (1-2 sentences)\n\
         2. New entries: one line per new ticker, format\n\
            TICKER: [business in under 10 words]. Watch: [the setup]\n\
         \n\
         If you don't know a ticker, write \"unknown\" instead of inventing.\n\
         Output directly, no preamble.",
        date = board.latest_date,
        top = join_or(&top, "none"),
        newcomers = join_or(&newcomers, "none"),
        dropped = join_or(&dropped, "none"),
    )
}

/// Prompt asking for one-line business blurbs for a batch of tickers.
pub fn ticker_descriptions(tickers: &[String]) -> String {
    let list: Vec<&str> = tickers.iter().take(15).map(String::as_str).collect();
    format!(
        "Give a one-line business description for each US ticker below\n\
         (10-15 words each, main business only):\n\
         \n\
         {}\n\
         \n\
         Format, exactly one per line:\n\
         TICKER: description\n\
         \n\
         Write \"TICKER: unknown\" for anything you don't recognize.\n\
         Output only the formatted lines.",
        list.join(", ")
    )
}

/// Parse a `TICKER: description` reply. Tickers absent from the reply map
/// to "unknown" so the report table never has holes.
pub fn parse_descriptions(reply: &str, tickers: &[String]) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for line in reply.lines() {
        let Some((ticker, desc)) = line.split_once(':') else {
            continue;
        };
        let ticker = ticker.trim().to_uppercase();
        let desc = desc.trim();
        if !desc.is_empty() && tickers.iter().any(|t| t.eq_ignore_ascii_case(&ticker)) {
            out.insert(ticker, desc.to_string());
        }
    }
    for ticker in tickers {
        out.entry(ticker.to_uppercase())
            .or_insert_with(|| "unknown".to_string());
    }
    out
}

fn join_or<'a>(items: &[&'a str], empty: &'a str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}
