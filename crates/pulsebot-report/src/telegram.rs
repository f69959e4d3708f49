//! Compact Telegram message formatting (Markdown parse mode).

use pulsebot_types::{BreadthData, MomentumBoard};

/// Longest analysis excerpt a chat message carries.
const ANALYSIS_EXCERPT: usize = 500;

/// Format the Market Monitor push message.
pub fn market_monitor(data: &BreadthData, analysis: &str, date: &str) -> String {
    let (up4, down4, r5, r10, emoji) = match data.latest() {
        Some(row) => (
            row.up_4pct.to_string(),
            row.down_4pct.to_string(),
            row.ratio_5d.to_string(),
            row.ratio_10d.to_string(),
            sentiment_emoji(row.ratio_5d),
        ),
        None => ("N/A".into(), "N/A".into(), "N/A".into(), "N/A".into(), "📊"),
    };

    format!(
        "{emoji} *Market Monitor {date}*\n\
         \n\
         📈 up 4%+: `{up4}` | 📉 down 4%+: `{down4}`\n\
         📊 5-day: `{r5}` | 10-day: `{r10}`\n\
         \n\
         *Analysis:*\n\
         {}\n\
         \n\
         🔗 [Full data](https://stockbee.blogspot.com/p/mm.html)",
        excerpt(analysis, ANALYSIS_EXCERPT)
    )
}

/// Format the Momentum 50 push message.
pub fn momentum(board: &MomentumBoard, analysis: &str, date: &str) -> String {
    let preview: Vec<String> = board
        .tickers
        .iter()
        .take(10)
        .map(|t| format!("`{t}`"))
        .collect();

    let new_section = if board.new_entries.is_empty() {
        String::new()
    } else {
        let newcomers: Vec<String> = board
            .new_entries
            .iter()
            .take(5)
            .map(|t| format!("`{t}`"))
            .collect();
        format!("\n🆕 *New:* {}", newcomers.join(" "))
    };

    format!(
        "🚀 *Momentum 50 {date}*\n\
         \n\
         *Top 10:*\n\
         {}\n\
         {new_section}\n\
         \n\
         *Analysis:*\n\
         {}\n\
         \n\
         🔗 [Full board](https://docs.google.com/spreadsheets/d/1xjbe9SF0HsxwY_Uy3NC2tT92BqK0nhArUaYU16Q0p9M)",
        preview.join(" "),
        excerpt(analysis, 400)
    )
}

/// Market mood marker from the 5-day ratio.
fn sentiment_emoji(ratio_5d: f64) -> &'static str {
    if ratio_5d > 1.2 {
        "🟢"
    } else if ratio_5d < 0.8 {
        "🔴"
    } else {
        "🟡"
    }
}

/// Truncate on a char boundary with an ellipsis.
fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsebot_types::BreadthRow;

    fn breadth(ratio_5d: f64) -> BreadthData {
        BreadthData {
            rows: vec![BreadthRow {
                date: "2/3/2026".into(),
                up_4pct: 321,
                down_4pct: 531,
                ratio_5d,
                ratio_10d: 0.96,
                up_25pct_qtr: 612,
                down_25pct_qtr: 404,
            }],
        }
    }

    #[test]
    fn test_market_monitor_message() {
        let msg = market_monitor(&breadth(0.59), "weak tape", "2026-02-03");
        assert!(msg.starts_with("🔴 *Market Monitor 2026-02-03*"));
        assert!(msg.contains("up 4%+: `321`"));
        assert!(msg.contains("weak tape"));
    }

    #[test]
    fn test_sentiment_emoji_bands() {
        assert_eq!(sentiment_emoji(1.5), "🟢");
        assert_eq!(sentiment_emoji(1.0), "🟡");
        assert_eq!(sentiment_emoji(0.5), "🔴");
    }

    #[test]
    fn test_market_monitor_no_data() {
        let msg = market_monitor(&BreadthData { rows: vec![] }, "n/a", "2026-02-03");
        assert!(msg.contains("up 4%+: `N/A`"));
    }

    #[test]
    fn test_momentum_message_new_entries() {
        let board = MomentumBoard {
            latest_date: "02/03/2026".into(),
            tickers: vec!["ANL".into(), "AZN".into()],
            new_entries: vec!["AZN".into()],
            dropped: vec![],
        };
        let msg = momentum(&board, "rotation", "2026-02-03");
        assert!(msg.contains("`ANL` `AZN`"));
        assert!(msg.contains("🆕 *New:* `AZN`"));
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "宽".repeat(600);
        let cut = excerpt(&long, 500);
        assert_eq!(cut.chars().count(), 501);
        assert!(cut.ends_with('…'));
    }
}
