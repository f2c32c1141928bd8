use async_trait::async_trait;

use crate::error::LlmError;

/// A backend that turns a prompt into a single text completion.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short identifier used in logs and ping results, e.g. `"anthropic"`.
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}
