//! HTTP-backed [`TextProvider`](crate::TextProvider) implementations.

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod tongyi;

use crate::config::{ProviderConfig, ProviderKind};
use crate::provider::TextProvider;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use tongyi::TongyiProvider;

/// Build the provider for one configured backend, sharing `client`.
pub fn build(client: reqwest::Client, config: &ProviderConfig) -> Box<dyn TextProvider> {
    match config.kind {
        ProviderKind::Anthropic => Box::new(AnthropicProvider::new(client, config)),
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(client, config)),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(client, config)),
        ProviderKind::Tongyi => Box::new(TongyiProvider::new(client, config)),
    }
}
