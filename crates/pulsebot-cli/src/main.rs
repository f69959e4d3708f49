use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::info;

use pulsebot_bot::Bot;
use pulsebot_config::Config;

#[derive(Parser)]
#[command(name = "pulsebot", about = "Stockbee market breadth Telegram bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot: scheduler, daily pushes and chat commands
    Run,
    /// Run one push pipeline immediately and exit
    Push {
        /// Which report to push
        #[arg(value_enum)]
        job: PushJob,
    },
    /// Check configuration and connectivity
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum PushJob {
    MarketMonitor,
    Momentum,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Run => {
            rt.block_on(async {
                let bot = Arc::new(Bot::new(config));
                let cancel = CancellationToken::new();

                let ctrlc = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("received ctrl-c, shutting down");
                        ctrlc.cancel();
                    }
                });

                bot.run(cancel).await
            })?;
        }
        Commands::Push { job } => {
            rt.block_on(async {
                let bot = Bot::new(config);
                match job {
                    PushJob::MarketMonitor => bot.push_market_monitor().await,
                    PushJob::Momentum => bot.push_momentum().await,
                }
            })?;
        }
        Commands::Health => {
            println!("configuration loaded");
            println!("  chat id: {}", config.chat_id);
            println!("  timezone: {}", config.timezone.name());
            println!("  data dir: {}", config.data_dir.display());
            println!(
                "  market monitor push: {}",
                config.market_monitor_time.format("%H:%M")
            );
            println!("  momentum push: {}", config.momentum_time.format("%H:%M"));
            println!(
                "  zhipu key: {}",
                if config.zhipu_api_key.is_some() { "set" } else { "not set" }
            );
            println!(
                "  gemini key: {}",
                if config.gemini_api_key.is_some() { "set" } else { "not set" }
            );

            rt.block_on(async {
                let bot = Bot::new(config);
                let me = bot.api.get_me().await?;
                println!(
                    "telegram ok: @{}",
                    me.username.unwrap_or(me.first_name)
                );
                anyhow::Ok(())
            })?;
        }
    }

    Ok(())
}
