//! Telegram Bot API client and long-polling loop (no webhook required).

pub mod api;
pub mod polling;
pub mod types;

pub use api::TelegramApi;
