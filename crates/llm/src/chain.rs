//! Ordered provider fallback.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use texbook_core::error::CoreError;
use texbook_core::exercises::extract_exercises;
use texbook_core::generation::{ContentGenerator, GeneratedDraft, GenerationContext};
use texbook_core::outline::OutlineNode;
use texbook_core::prompt::{build_content_prompt, PING_PROMPT};

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::provider::TextProvider;
use crate::providers;

/// Token budget for a connectivity probe.
const PING_MAX_TOKENS: u32 = 16;

/// A successful completion and the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub provider: &'static str,
    pub model: String,
    pub text: String,
}

/// Outcome of probing one provider.
#[derive(Debug, Clone, Serialize)]
pub struct PingResult {
    pub provider: &'static str,
    pub model: String,
    pub success: bool,
    pub message: String,
}

/// Tries each provider in order until one answers.
pub struct ProviderChain {
    providers: Vec<Box<dyn TextProvider>>,
    max_tokens: u32,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn TextProvider>>, max_tokens: u32) -> Self {
        Self {
            providers,
            max_tokens,
        }
    }

    /// Build the HTTP providers listed in `config`, sharing one client.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let providers = config
            .providers
            .iter()
            .map(|p| providers::build(client.clone(), p))
            .collect();

        Ok(Self::new(providers, config.max_tokens))
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in fallback order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Complete `prompt` with the first provider that succeeds.
    ///
    /// Returns [`LlmError::AllProvidersFailed`] carrying one message per
    /// failed attempt, or an empty list when no provider is configured.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, LlmError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match provider.complete(prompt, max_tokens).await {
                Ok(text) => {
                    tracing::debug!(
                        provider = provider.name(),
                        model = provider.model(),
                        chars = text.len(),
                        "LLM completion succeeded"
                    );
                    return Ok(Completion {
                        provider: provider.name(),
                        model: provider.model().to_string(),
                        text,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        model = provider.model(),
                        error = %e,
                        "LLM provider failed, trying next"
                    );
                    failures.push(format!("{}: {e}", provider.name()));
                }
            }
        }

        Err(LlmError::AllProvidersFailed(failures))
    }

    /// Send a short probe to every provider, in order, and report each result.
    pub async fn ping(&self) -> Vec<PingResult> {
        let mut results = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let (success, message) = match provider.complete(PING_PROMPT, PING_MAX_TOKENS).await {
                Ok(_) => (true, "Connection successful".to_string()),
                Err(e) => (false, e.to_string()),
            };
            results.push(PingResult {
                provider: provider.name(),
                model: provider.model().to_string(),
                success,
                message,
            });
        }
        results
    }
}

#[async_trait]
impl ContentGenerator for ProviderChain {
    async fn generate(
        &self,
        node: &OutlineNode,
        context: &GenerationContext,
    ) -> Result<GeneratedDraft, CoreError> {
        let prompt = build_content_prompt(node, context);
        let completion = self.complete(&prompt, self.max_tokens).await?;
        let exercises = extract_exercises(&completion.text);

        Ok(GeneratedDraft {
            content: completion.text,
            exercises,
        })
    }
}
