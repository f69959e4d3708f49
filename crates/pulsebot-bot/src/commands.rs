//! Command parsing for inbound chat messages.

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Greeting / onboarding.
    Start,
    /// Show help.
    Help,
    /// Liveness check.
    Ping,
    /// Run the Market Monitor push now.
    MarketMonitor,
    /// Run the Momentum 50 push now.
    Momentum,
    /// Show scheduled job status.
    Jobs,
    /// Explicit question for the AI.
    Ask { question: String },
    /// Bare text, treated as a natural-language question.
    Query { text: String },
    /// Anything starting with `/` we don't know.
    Unknown { name: String },
}

impl Command {
    /// Parse user input. Never fails: unknown slash-commands become
    /// [`Command::Unknown`] and plain text becomes [`Command::Query`].
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if !input.starts_with('/') {
            return Command::Query {
                text: input.to_string(),
            };
        }

        let mut parts = input[1..].splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        // Telegram appends "@botname" in group chats.
        let name = head.split('@').next().unwrap_or("").to_lowercase();

        match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "ping" => Command::Ping,
            "mm" | "marketmonitor" => Command::MarketMonitor,
            "m50" | "momentum" => Command::Momentum,
            "jobs" => Command::Jobs,
            "ask" => Command::Ask {
                question: rest.to_string(),
            },
            _ => Command::Unknown { name },
        }
    }

    /// Help text for `/help` and `/start`.
    pub fn help_text() -> &'static str {
        "📋 *Commands*\n\
         \n\
         /mm - push the Market Monitor report now\n\
         /m50 - push the Momentum 50 report now\n\
         /jobs - scheduled job status\n\
         /ask <question> - ask the analyst\n\
         /ping - check the bot is alive\n\
         /help - this message\n\
         \n\
         Plain messages are treated as questions."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/ping"), Command::Ping);
        assert_eq!(Command::parse("/mm"), Command::MarketMonitor);
        assert_eq!(Command::parse("/m50"), Command::Momentum);
        assert_eq!(Command::parse("/jobs"), Command::Jobs);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Command::parse("/MM"), Command::MarketMonitor);
        assert_eq!(Command::parse("/Help"), Command::Help);
    }

    #[test]
    fn test_parse_strips_bot_suffix() {
        assert_eq!(Command::parse("/ping@pulsebot"), Command::Ping);
    }

    #[test]
    fn test_parse_ask_with_question() {
        assert_eq!(
            Command::parse("/ask what is market breadth?"),
            Command::Ask {
                question: "what is market breadth?".into()
            }
        );
    }

    #[test]
    fn test_parse_ask_without_question() {
        assert_eq!(Command::parse("/ask"), Command::Ask { question: String::new() });
    }

    #[test]
    fn test_parse_bare_text_is_query() {
        assert_eq!(
            Command::parse("how does SHOP look today"),
            Command::Query {
                text: "how does SHOP look today".into()
            }
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("/frobnicate now"),
            Command::Unknown {
                name: "frobnicate".into()
            }
        );
    }
}
