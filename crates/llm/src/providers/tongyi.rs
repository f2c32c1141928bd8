//! Alibaba DashScope (Tongyi Qianwen) text generation API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::LlmError;
use crate::http;
use crate::provider::TextProvider;

const NAME: &str = "tongyi";

pub struct TongyiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    input: Input<'a>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Input<'a> {
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Parameters {
    max_tokens: u32,
    result_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    output: Output,
}

/// DashScope answers either with `choices` (`result_format = "message"`)
/// or with a bare `text` field.
#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl TongyiProvider {
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn output_text(response: GenerationResponse) -> Option<String> {
    let Output { text, choices } = response.output;
    choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .or(text)
}

#[async_trait]
impl TextProvider for TongyiProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let body = GenerationRequest {
            model: &self.model,
            input: Input {
                messages: [Message {
                    role: "user",
                    content: prompt,
                }],
            },
            parameters: Parameters {
                max_tokens,
                result_format: "message",
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/api/v1/services/aigc/text-generation/generation",
                self.base_url
            ))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: GenerationResponse = http::parse_response(NAME, response).await?;
        http::non_empty(NAME, output_text(parsed))
    }
}
