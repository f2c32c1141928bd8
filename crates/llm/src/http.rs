//! Response helpers shared by the HTTP providers.

use serde::de::DeserializeOwned;

use crate::error::LlmError;

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or an [`LlmError::Api`] carrying the status and
/// body text on failure.
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(LlmError::Api {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, LlmError> {
    let response = ensure_success(provider, response).await?;
    Ok(response.json::<T>().await?)
}

/// Reject blank completions.
pub(crate) fn non_empty(provider: &'static str, text: Option<String>) -> Result<String, LlmError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(LlmError::EmptyResponse(provider)),
    }
}
