//! Bot assembly: wires the scrapers, AI router, scheduler and Telegram
//! channel together and runs the main loops.

pub mod commands;
mod dispatcher;
mod jobs;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use pulsebot_ai::AnalysisRouter;
use pulsebot_config::Config;
use pulsebot_scrape::{MarketMonitor, Momentum50};
use pulsebot_sched::{DailyJob, JobGuards, Scheduler};
use pulsebot_telegram::TelegramApi;
use pulsebot_telegram::types::{BotCommand, SetMyCommandsParams};
use pulsebot_types::{JOB_MARKET_MONITOR, JOB_MOMENTUM};

/// Everything the dispatcher and job pipelines need, assembled once at
/// startup.
pub struct Bot {
    pub config: Config,
    pub api: TelegramApi,
    pub router: AnalysisRouter,
    pub market: MarketMonitor,
    pub momentum: Momentum50,
    pub guards: JobGuards,
    pub scheduler: Arc<Scheduler>,
}

impl Bot {
    pub fn new(config: Config) -> Self {
        let api = TelegramApi::new(&config.telegram_token);
        let router = AnalysisRouter::from_keys(
            config.zhipu_api_key.as_deref(),
            config.gemini_api_key.as_deref(),
        );
        let scheduler = Arc::new(Scheduler::new(vec![
            DailyJob::new(JOB_MARKET_MONITOR, config.market_monitor_time, config.timezone),
            DailyJob::new(JOB_MOMENTUM, config.momentum_time, config.timezone),
        ]));

        Self {
            api,
            router,
            market: MarketMonitor::new(),
            momentum: Momentum50::new(),
            guards: JobGuards::new([JOB_MARKET_MONITOR, JOB_MOMENTUM]),
            scheduler,
            config,
        }
    }

    /// Run the bot until `cancel` fires: scheduler, job executor,
    /// Telegram polling and the dispatcher loop.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) -> anyhow::Result<()> {
        let me = self.api.get_me().await.context("telegram token check")?;
        info!(
            username = me.username.as_deref().unwrap_or(&me.first_name),
            "connected to telegram"
        );

        if let Err(e) = self.api.set_my_commands(&command_menu()).await {
            warn!("setMyCommands failed: {e}");
        }

        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<String>();
        let scheduler_task = tokio::spawn(
            Arc::clone(&self.scheduler).run(job_tx, cancel.child_token()),
        );

        let executor = {
            let bot = Arc::clone(&self);
            let cancel = cancel.child_token();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        id = job_rx.recv() => {
                            let Some(id) = id else { break };
                            bot.execute_job(&id).await;
                        }
                    }
                }
            })
        };

        // The polling loop needs its own client; replies go out through
        // the shared one.
        let (msg_tx, mut msg_rx) = mpsc::channel(64);
        let poller = {
            let token = self.config.telegram_token.clone();
            let cancel = cancel.child_token();
            tokio::spawn(async move {
                let api = TelegramApi::new(&token);
                pulsebot_telegram::polling::run_polling_loop(&api, msg_tx, cancel).await;
            })
        };

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                msg = msg_rx.recv() => {
                    let Some(msg) = msg else { break };
                    let reply = self.dispatch(&msg).await;
                    if let Err(e) = self.api.send_markdown(msg.chat_id, &reply).await {
                        error!(chat_id = msg.chat_id, "failed to send reply: {e:#}");
                    }
                }
            }
        }

        info!("shutting down");
        let _ = poller.await;
        let _ = executor.await;
        let _ = scheduler_task.await;
        Ok(())
    }
}

fn command_menu() -> SetMyCommandsParams {
    let commands = [
        ("mm", "push the Market Monitor report now"),
        ("m50", "push the Momentum 50 report now"),
        ("jobs", "scheduled job status"),
        ("ask", "ask the analyst a question"),
        ("ping", "check the bot is alive"),
        ("help", "show help"),
    ];
    SetMyCommandsParams {
        commands: commands
            .into_iter()
            .map(|(command, description)| BotCommand {
                command: command.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }
}
