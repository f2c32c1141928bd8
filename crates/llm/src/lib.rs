//! LLM text providers and the ordered fallback chain used for generation.

pub mod chain;
pub mod config;
pub mod error;
mod http;
pub mod provider;
pub mod providers;

pub use chain::{Completion, PingResult, ProviderChain};
pub use config::{LlmConfig, ProviderConfig, ProviderKind};
pub use error::LlmError;
pub use provider::TextProvider;
