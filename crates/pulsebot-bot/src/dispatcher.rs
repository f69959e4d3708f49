//! Maps parsed commands to replies.

use tracing::{info, warn};

use pulsebot_ai::Analysis;
use pulsebot_types::InboundMessage;

use crate::Bot;
use crate::commands::Command;

impl Bot {
    /// Handle one inbound message and produce the reply text.
    pub async fn dispatch(&self, msg: &InboundMessage) -> String {
        let command = Command::parse(&msg.text);
        info!(
            chat_id = msg.chat_id,
            sender = msg.sender_name.as_deref().unwrap_or("?"),
            command = command_label(&command),
            "dispatching command"
        );

        match command {
            Command::Start | Command::Help => Command::help_text().to_string(),
            Command::Ping => {
                let now = chrono::Utc::now().with_timezone(&self.config.timezone);
                format!("🏓 pong · {}", now.format("%Y-%m-%d %H:%M:%S %Z"))
            }
            Command::Jobs => self.jobs_reply().await,
            Command::MarketMonitor => {
                self.manual_push(pulsebot_types::JOB_MARKET_MONITOR, "Market Monitor")
                    .await
            }
            Command::Momentum => {
                self.manual_push(pulsebot_types::JOB_MOMENTUM, "Momentum 50")
                    .await
            }
            Command::Ask { question } => {
                if question.is_empty() {
                    "Usage: /ask <question>".to_string()
                } else {
                    self.answer(msg, &question).await
                }
            }
            Command::Query { text } => {
                if text.is_empty() {
                    Command::help_text().to_string()
                } else {
                    self.answer(msg, &text).await
                }
            }
            Command::Unknown { name } => {
                format!("Unknown command /{name}. Try /help.")
            }
        }
    }

    /// Run a push on demand, refusing while the same job is in flight.
    async fn manual_push(&self, job_id: &str, label: &str) -> String {
        let Some(guard) = self.guards.get(job_id) else {
            return format!("⚠️ {label} is not configured.");
        };
        let Ok(_held) = guard.try_lock() else {
            return format!("⏳ {label} is already running, hang on.");
        };

        let result = match job_id {
            pulsebot_types::JOB_MARKET_MONITOR => self.push_market_monitor().await,
            _ => self.push_momentum().await,
        };

        match result {
            Ok(()) => format!("✅ {label} pushed."),
            Err(e) => {
                warn!(job_id, "manual push failed: {e:#}");
                format!("❌ {label} failed: {e}")
            }
        }
    }

    async fn jobs_reply(&self) -> String {
        let statuses = self.scheduler.status().await;
        let mut out = String::from("🗓 *Scheduled jobs*\n");
        for s in statuses {
            let fired = s
                .last_fired
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "never".to_string());
            out.push_str(&format!(
                "\n• `{}` at {} ({}) — last fired: {}",
                s.id, s.at, s.timezone, fired
            ));
        }
        out
    }

    /// Relay a free-text question to the AI, with a typing indicator
    /// while the answer is in flight.
    async fn answer(&self, msg: &InboundMessage, question: &str) -> String {
        if !self.router.is_enabled() {
            return "🤐 AI analysis is not configured on this bot.".to_string();
        }

        if let Err(e) = self
            .api
            .send_chat_action(&pulsebot_telegram::types::SendChatActionParams {
                chat_id: msg.chat_id,
                action: "typing".to_string(),
            })
            .await
        {
            warn!("sendChatAction failed: {e}");
        }

        match self.router.analyze(question).await {
            Analysis::Text(text) => text,
            Analysis::Unavailable { detail } => {
                warn!("analysis unavailable: {detail}");
                "😵 The analyst is unavailable right now, try again in a minute.".to_string()
            }
        }
    }
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Start => "start",
        Command::Help => "help",
        Command::Ping => "ping",
        Command::MarketMonitor => "market-monitor",
        Command::Momentum => "momentum",
        Command::Jobs => "jobs",
        Command::Ask { .. } => "ask",
        Command::Query { .. } => "query",
        Command::Unknown { .. } => "unknown",
    }
}
