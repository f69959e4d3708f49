//! Environment-driven configuration.
//!
//! All settings come from environment variables (a `.env` file is loaded
//! first if present). Only the Telegram token and chat id are required;
//! AI keys are optional and their absence degrades features rather than
//! failing startup.

use std::path::PathBuf;

use chrono::NaiveTime;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Top-level pulsebot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub telegram_token: String,
    /// Chat the daily pushes are delivered to.
    pub chat_id: i64,
    /// Zhipu GLM API key (primary AI provider).
    pub zhipu_api_key: Option<String>,
    /// Gemini API key (fallback AI provider).
    pub gemini_api_key: Option<String>,
    /// Timezone the daily schedule is evaluated in.
    pub timezone: Tz,
    /// Directory Markdown reports are written to.
    pub data_dir: PathBuf,
    /// Local time of the Market Monitor push.
    pub market_monitor_time: NaiveTime,
    /// Local time of the Momentum 50 push.
    pub momentum_time: NaiveTime,
}

const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_MARKET_MONITOR_TIME: &str = "08:30";
const DEFAULT_MOMENTUM_TIME: &str = "08:35";

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present; ignore absence.
        let _ = dotenvy::dotenv();

        let telegram_token =
            required("TELEGRAM_TOKEN")?;
        let chat_id_raw = required("TELEGRAM_CHAT_ID")?;
        let chat_id = chat_id_raw.parse::<i64>().map_err(|_| ConfigError::Invalid {
            var: "TELEGRAM_CHAT_ID",
            value: chat_id_raw,
        })?;

        let zhipu_api_key = optional("ZHIPU_API_KEY");
        let gemini_api_key = optional("GEMINI_API_KEY");
        if zhipu_api_key.is_none() {
            tracing::warn!("ZHIPU_API_KEY not set, AI analysis disabled");
        }

        let tz_raw = optional("BOT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.into());
        let timezone: Tz = tz_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "BOT_TIMEZONE",
            value: tz_raw,
        })?;

        let data_dir = PathBuf::from(
            optional("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into()),
        );

        let market_monitor_time =
            parse_time("MARKET_MONITOR_TIME", DEFAULT_MARKET_MONITOR_TIME)?;
        let momentum_time = parse_time("MOMENTUM_TIME", DEFAULT_MOMENTUM_TIME)?;

        Ok(Self {
            telegram_token,
            chat_id,
            zhipu_api_key,
            gemini_api_key,
            timezone,
            data_dir,
            market_monitor_time,
            momentum_time,
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::Missing(var))
}

fn optional(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

fn parse_time(var: &'static str, default: &str) -> Result<NaiveTime, ConfigError> {
    let raw = optional(var).unwrap_or_else(|| default.into());
    NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|_| ConfigError::Invalid { var, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_default() {
        let t = parse_time("PULSEBOT_TEST_UNSET_TIME", "08:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_time_invalid() {
        unsafe { std::env::set_var("PULSEBOT_TEST_BAD_TIME", "25:99") };
        let err = parse_time("PULSEBOT_TEST_BAD_TIME", "08:30").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == "PULSEBOT_TEST_BAD_TIME"));
        unsafe { std::env::remove_var("PULSEBOT_TEST_BAD_TIME") };
    }

    #[test]
    fn test_optional_blank_is_none() {
        unsafe { std::env::set_var("PULSEBOT_TEST_BLANK", "   ") };
        assert!(optional("PULSEBOT_TEST_BLANK").is_none());
        unsafe { std::env::remove_var("PULSEBOT_TEST_BLANK") };
    }

    #[test]
    fn test_default_timezone_parses() {
        let tz: Tz = DEFAULT_TIMEZONE.parse().unwrap();
        assert_eq!(tz.name(), "Asia/Shanghai");
    }
}
