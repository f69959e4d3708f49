//! Deterministic fallback analysis, used when no provider is reachable.
//!
//! Mirrors the numbered output shape of the AI prompts so the report
//! template doesn't care which path produced the text.

use pulsebot_types::{BreadthRow, MomentumBoard};

/// Rule-based market breadth verdict.
pub fn market_breadth(row: &BreadthRow) -> String {
    let mut lines = Vec::with_capacity(4);

    if row.up_4pct as f64 > row.down_4pct as f64 * 1.5 {
        lines.push(format!(
            "1. Short-term: strong - up 4%+ ({}) clearly outnumbers down 4%+ ({})",
            row.up_4pct, row.down_4pct
        ));
    } else if row.down_4pct as f64 > row.up_4pct as f64 * 1.5 {
        lines.push(format!(
            "1. Short-term: weak - down 4%+ ({}) clearly outnumbers up 4%+ ({}), 5-day ratio {}",
            row.down_4pct, row.up_4pct, row.ratio_5d
        ));
    } else {
        lines.push(format!(
            "1. Short-term: choppy - advances and declines close (up {}/down {})",
            row.up_4pct, row.down_4pct
        ));
    }

    if row.up_25pct_qtr > row.down_25pct_qtr {
        lines.push(format!(
            "2. Medium-term: strong - quarterly gainers ({}) outnumber losers ({})",
            row.up_25pct_qtr, row.down_25pct_qtr
        ));
    } else {
        lines.push(format!(
            "2. Medium-term: weak - quarterly losers ({}) outnumber gainers ({})",
            row.down_25pct_qtr, row.up_25pct_qtr
        ));
    }

    if row.up_25pct_qtr > 0 && row.up_25pct_qtr < 350 {
        lines.push(format!(
            "3. Signal: bottoming zone - only {} stocks up 25%+ on the quarter (below 350)",
            row.up_25pct_qtr
        ));
    } else if row.up_4pct > 1000 && row.ratio_5d > 2.0 {
        lines.push(format!(
            "3. Signal: overheated - {} stocks up 4%+ with 5-day ratio {}",
            row.up_4pct, row.ratio_5d
        ));
    } else {
        lines.push("3. Signal: none".to_string());
    }

    if row.ratio_5d < 1.0 && row.down_4pct > row.up_4pct {
        lines.push("4. Stance: wait - short-term weakness, avoid chasing, keep size small".into());
    } else if row.ratio_5d > 1.2 {
        lines.push("4. Stance: add - leaders acting well, size individual risk".into());
    } else {
        lines.push("4. Stance: cautious - keep watching, mind risk/reward".into());
    }

    lines.join("\n")
}

/// Rule-based Momentum 50 commentary.
pub fn momentum(board: &MomentumBoard) -> String {
    let mut lines = Vec::new();

    let turnover = board.turnover_pct();
    if turnover > 20.0 {
        lines.push(format!(
            "1. Board turnover high ({turnover:.0}%), leadership may be rotating"
        ));
    } else {
        lines.push(format!(
            "1. Board turnover {turnover:.0}%, leadership relatively stable"
        ));
    }

    lines.push("\n2. New entries:".to_string());
    if board.new_entries.is_empty() {
        lines.push("no new entries today".to_string());
    } else {
        for ticker in board.new_entries.iter().take(10) {
            lines.push(format!("{ticker}: needs research. Watch: fresh entrant, breakout setup"));
        }
    }

    lines.push("\n3. Stance:".to_string());
    if board.new_entries.len() > 10 {
        lines.push("- many fresh names, watch new leadership but don't chase extended moves".into());
    } else {
        lines.push("- focus on names holding the board day after day".into());
    }
    lines.push("- pair with volume/price action, keep stops in place".into());

    lines.join("\n")
}
