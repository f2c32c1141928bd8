//! Provider configuration loaded from environment variables.

use std::fmt;
use std::str::FromStr;

/// Default provider order when `LLM_PROVIDERS` is unset.
pub const DEFAULT_PROVIDER_ORDER: &str = "anthropic,openai,gemini,tongyi";

/// The supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Gemini,
    Tongyi,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Tongyi => "tongyi",
        }
    }

    /// Prefix of the provider's environment variables, e.g. `GEMINI` for
    /// `GEMINI_API_KEY`.
    pub fn env_prefix(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC",
            Self::OpenAi => "OPENAI",
            Self::Gemini => "GEMINI",
            Self::Tongyi => "TONGYI",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-3-5-sonnet-20241022",
            Self::OpenAi => "gpt-4o-mini",
            Self::Gemini => "gemini-pro",
            Self::Tongyi => "qwen-plus",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAi => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Tongyi => "https://dashscope.aliyuncs.com",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "tongyi" | "dashscope" => Ok(Self::Tongyi),
            other => Err(format!("unknown LLM provider '{other}'")),
        }
    }
}

/// One backend with credentials.
#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// LLM settings shared by every provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Backends in fallback order. Only providers with an API key appear.
    pub providers: Vec<ProviderConfig>,
    /// Completion budget per generation call (default: `4096`).
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds (default: `120`).
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                            |
    /// |-----------------------|------------------------------------|
    /// | `LLM_PROVIDERS`       | `anthropic,openai,gemini,tongyi`   |
    /// | `<PREFIX>_API_KEY`    | unset (provider skipped)           |
    /// | `<PREFIX>_MODEL`      | per provider                       |
    /// | `<PREFIX>_BASE_URL`   | the provider's public endpoint     |
    /// | `LLM_MAX_TOKENS`      | `4096`                             |
    /// | `LLM_TIMEOUT_SECS`    | `120`                              |
    ///
    /// `CLAUDE_API_KEY` is accepted in place of `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let order = var("LLM_PROVIDERS").unwrap_or_else(|| DEFAULT_PROVIDER_ORDER.into());
        let mut providers: Vec<ProviderConfig> = Vec::new();

        for name in order.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let kind = match name.parse::<ProviderKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring LLM provider");
                    continue;
                }
            };
            if providers.iter().any(|p| p.kind == kind) {
                continue;
            }

            let prefix = kind.env_prefix();
            let api_key = var(&format!("{prefix}_API_KEY")).or_else(|| match kind {
                ProviderKind::Anthropic => var("CLAUDE_API_KEY"),
                _ => None,
            });
            let Some(api_key) = api_key else {
                tracing::debug!(provider = %kind, "No API key, provider skipped");
                continue;
            };

            providers.push(ProviderConfig {
                kind,
                api_key,
                model: var(&format!("{prefix}_MODEL"))
                    .unwrap_or_else(|| kind.default_model().into()),
                base_url: var(&format!("{prefix}_BASE_URL"))
                    .unwrap_or_else(|| kind.default_base_url().into()),
            });
        }

        let max_tokens: u32 = var("LLM_MAX_TOKENS")
            .unwrap_or_else(|| "4096".into())
            .parse()
            .expect("LLM_MAX_TOKENS must be a valid u32");

        let timeout_secs: u64 = var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "120".into())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            providers,
            max_tokens,
            timeout_secs,
        }
    }
}
