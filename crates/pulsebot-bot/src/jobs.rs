//! The two daily push pipelines: fetch → analyze → persist → deliver.
//!
//! Both the scheduler executor and the manual `/mm`-`/m50` handlers call
//! into these, always under the job's exclusion guard.

use anyhow::Context;
use chrono::Utc;
use tracing::warn;

use pulsebot_ai::{Analysis, prompts, rules};
use pulsebot_report::{CATEGORY_MARKET_MONITOR, CATEGORY_MOMENTUM, markdown, store, telegram};

use crate::Bot;

impl Bot {
    /// Market Monitor push. Errors returned here are fetch or delivery
    /// failures; an AI outage degrades to the rule-based analysis.
    pub async fn push_market_monitor(&self) -> anyhow::Result<()> {
        let data = self.market.fetch().await.context("market monitor fetch")?;
        let latest = data.latest().context("market monitor returned no rows")?;

        let analysis = match self.router.analyze(&prompts::market_breadth(latest)).await {
            Analysis::Text(text) => text,
            Analysis::Unavailable { detail } => {
                warn!("AI unavailable ({detail}), using rule-based analysis");
                rules::market_breadth(latest)
            }
        };

        let now = Utc::now().with_timezone(&self.config.timezone).naive_local();
        let date = now.format("%Y-%m-%d").to_string();

        let doc = markdown::market_monitor(&data, &analysis, now);
        if let Err(e) =
            store::write_artifact(&self.config.data_dir, CATEGORY_MARKET_MONITOR, &date, &doc)
        {
            warn!("market monitor report generated but not saved: {e}");
        }

        let message = telegram::market_monitor(&data, &analysis, &date);
        self.api
            .send_markdown(self.config.chat_id, &message)
            .await
            .context("market monitor delivery")?;
        Ok(())
    }

    /// Momentum 50 push. Ticker blurbs are best-effort; the push goes
    /// out without them when the AI is down.
    pub async fn push_momentum(&self) -> anyhow::Result<()> {
        let board = self.momentum.fetch().await.context("momentum 50 fetch")?;

        let descriptions = if board.new_entries.is_empty() {
            Default::default()
        } else {
            let prompt = prompts::ticker_descriptions(&board.new_entries);
            match self.router.analyze(&prompt).await {
                Analysis::Text(reply) => prompts::parse_descriptions(&reply, &board.new_entries),
                Analysis::Unavailable { .. } => Default::default(),
            }
        };

        let analysis = match self.router.analyze(&prompts::momentum(&board)).await {
            Analysis::Text(text) => text,
            Analysis::Unavailable { detail } => {
                warn!("AI unavailable ({detail}), using rule-based analysis");
                rules::momentum(&board)
            }
        };

        let now = Utc::now().with_timezone(&self.config.timezone).naive_local();
        let date = now.format("%Y-%m-%d").to_string();

        let doc = markdown::momentum(&board, &analysis, &descriptions, now);
        if let Err(e) =
            store::write_artifact(&self.config.data_dir, CATEGORY_MOMENTUM, &date, &doc)
        {
            warn!("momentum report generated but not saved: {e}");
        }

        let message = telegram::momentum(&board, &analysis, &date);
        self.api
            .send_markdown(self.config.chat_id, &message)
            .await
            .context("momentum delivery")?;
        Ok(())
    }

    /// Run one job by id under its exclusion guard, waiting for any
    /// in-flight manual trigger to finish first. Failures are logged and
    /// reported to the chat; the job is not retried until the next
    /// calendar day.
    pub async fn execute_job(&self, id: &str) {
        let Some(guard) = self.guards.get(id) else {
            warn!(job_id = id, "no guard registered for job");
            return;
        };
        let _held = guard.lock().await;

        let result = match id {
            pulsebot_types::JOB_MARKET_MONITOR => self.push_market_monitor().await,
            pulsebot_types::JOB_MOMENTUM => self.push_momentum().await,
            other => {
                warn!(job_id = other, "unknown job id");
                return;
            }
        };

        if let Err(e) = result {
            warn!(job_id = id, "scheduled job failed: {e:#}");
            let note = format!("❌ scheduled job `{id}` failed: {e}");
            if let Err(send_err) = self.api.send_markdown(self.config.chat_id, &note).await {
                warn!("could not report job failure to chat: {send_err}");
            }
        }
    }
}
