use texbook_core::error::CoreError;

/// Errors from LLM provider calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response that carried no text.
    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    /// Every configured provider failed, or none is configured.
    #[error("All LLM providers failed: {}", summarize(.0))]
    AllProvidersFailed(Vec<String>),
}

fn summarize(attempts: &[String]) -> String {
    if attempts.is_empty() {
        "no providers configured".to_string()
    } else {
        attempts.join("; ")
    }
}

impl From<LlmError> for CoreError {
    fn from(err: LlmError) -> Self {
        CoreError::Generation(err.to_string())
    }
}
