//! AI analysis with two-tier provider fallback.
//!
//! The router tries the primary provider (Zhipu GLM), falling over to the
//! secondary (Gemini) on any failure or rate saturation. The primary is
//! never waited on: in an interactive chat a stale-but-prompt answer from
//! the fallback beats a delayed one from the first choice.

pub mod prompts;
pub mod providers;
pub mod rules;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use pulsebot_ratelimit::{Acquire, RateLimiter, RatePolicy};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned status {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// An LLM backend that can complete a single prompt.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Uniform analysis outcome. Callers never learn which provider answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Text(String),
    /// Every configured provider failed or was throttled.
    Unavailable { detail: String },
}

impl Analysis {
    pub fn text(&self) -> Option<&str> {
        match self {
            Analysis::Text(t) => Some(t),
            Analysis::Unavailable { .. } => None,
        }
    }
}

/// Routes analysis requests across providers in priority order, consulting
/// the rate limiter before each call.
pub struct AnalysisRouter {
    providers: Vec<Box<dyn Provider>>,
    limiter: RateLimiter,
}

impl AnalysisRouter {
    /// Build the router from optional API keys. A missing primary key
    /// leaves only the secondary; no keys at all means every `analyze`
    /// returns `Unavailable`.
    pub fn from_keys(zhipu_api_key: Option<&str>, gemini_api_key: Option<&str>) -> Self {
        let mut providers: Vec<Box<dyn Provider>> = Vec::new();
        if let Some(key) = zhipu_api_key {
            providers.push(Box::new(providers::ZhipuClient::new(key)));
        }
        if let Some(key) = gemini_api_key {
            providers.push(Box::new(providers::GeminiClient::new(key)));
        }

        let mut policies = HashMap::new();
        policies.insert(providers::ZHIPU.to_string(), RatePolicy::per_minute(30));
        policies.insert(providers::GEMINI.to_string(), RatePolicy::per_minute(10));

        Self::with_providers(providers, policies)
    }

    /// Assemble a router from explicit providers and policies.
    pub fn with_providers(
        providers: Vec<Box<dyn Provider>>,
        policies: HashMap<String, RatePolicy>,
    ) -> Self {
        Self {
            providers,
            limiter: RateLimiter::new(policies),
        }
    }

    /// Whether any provider is configured.
    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Run the prompt through the first provider that is neither throttled
    /// nor failing. Never blocks on a saturated rate window.
    pub async fn analyze(&self, prompt: &str) -> Analysis {
        let mut failures: Vec<String> = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            match self.limiter.acquire(name).await {
                Acquire::Ready => {}
                Acquire::RetryAfter(wait) => {
                    warn!(provider = name, wait_secs = wait.as_secs(), "provider throttled, skipping");
                    failures.push(format!("{name}: rate limited for {}s", wait.as_secs()));
                    continue;
                }
                Acquire::Rejected => {
                    failures.push(format!("{name}: disabled by rate policy"));
                    continue;
                }
            }

            match provider.complete(prompt).await {
                Ok(text) => {
                    info!(provider = name, chars = text.len(), "analysis completed");
                    return Analysis::Text(text);
                }
                Err(e) => {
                    warn!(provider = name, "provider call failed: {e}");
                    failures.push(format!("{name}: {e}"));
                }
            }
        }

        let detail = if failures.is_empty() {
            "no AI providers configured".to_string()
        } else {
            failures.join("; ")
        };
        Analysis::Unavailable { detail }
    }
}

/// Request timeout shared by the provider clients.
pub(crate) const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProvider {
        name: &'static str,
        reply: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl Provider for FakeProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(detail) => Err(ProviderError::Api {
                    status: 500,
                    detail: detail.to_string(),
                }),
            }
        }
    }

    fn router(providers: Vec<Box<dyn Provider>>) -> AnalysisRouter {
        AnalysisRouter::with_providers(providers, HashMap::new())
    }

    #[tokio::test]
    async fn test_primary_success() {
        let r = router(vec![
            Box::new(FakeProvider { name: "a", reply: Ok("from a") }),
            Box::new(FakeProvider { name: "b", reply: Ok("from b") }),
        ]);
        assert_eq!(r.analyze("x").await, Analysis::Text("from a".into()));
    }

    #[tokio::test]
    async fn test_fallback_hides_primary_failure() {
        let r = router(vec![
            Box::new(FakeProvider { name: "a", reply: Err("boom") }),
            Box::new(FakeProvider { name: "b", reply: Ok("from b") }),
        ]);
        // The caller sees only the secondary's payload.
        assert_eq!(r.analyze("x").await, Analysis::Text("from b".into()));
    }

    #[tokio::test]
    async fn test_all_failing_is_unavailable() {
        let r = router(vec![
            Box::new(FakeProvider { name: "a", reply: Err("down") }),
            Box::new(FakeProvider { name: "b", reply: Err("also down") }),
        ]);
        match r.analyze("x").await {
            Analysis::Unavailable { detail } => {
                assert!(detail.contains("a:"));
                assert!(detail.contains("b:"));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_throttled_primary_falls_over_without_waiting() {
        let mut policies = HashMap::new();
        // Primary's window admits one call; the second analyze must fall
        // straight through to the secondary.
        policies.insert("a".to_string(), RatePolicy::per_minute(1));
        let r = AnalysisRouter::with_providers(
            vec![
                Box::new(FakeProvider { name: "a", reply: Ok("from a") }),
                Box::new(FakeProvider { name: "b", reply: Ok("from b") }),
            ],
            policies,
        );
        assert_eq!(r.analyze("x").await, Analysis::Text("from a".into()));
        assert_eq!(r.analyze("x").await, Analysis::Text("from b".into()));
    }

    #[tokio::test]
    async fn test_no_providers_is_unavailable() {
        let r = router(vec![]);
        assert!(!r.is_enabled());
        match r.analyze("x").await {
            Analysis::Unavailable { detail } => {
                assert!(detail.contains("no AI providers"));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
