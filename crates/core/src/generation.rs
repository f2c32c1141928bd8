//! Content generation seam.
//!
//! The orchestration loop only knows about [`ContentGenerator`]; the LLM
//! provider chain implements it, and tests substitute scripted generators.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::exercises::Exercise;
use crate::outline::OutlineNode;
use crate::project::{Difficulty, Language, ProjectConfig};

/// Everything a generator may use besides the node itself.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// The project's full outline, for parent and sibling lookups.
    pub outline: Vec<OutlineNode>,
    pub latex_header: String,
    pub difficulty: Difficulty,
    pub writing_style: String,
    pub custom_commands: Vec<String>,
    pub language: Language,
}

impl GenerationContext {
    pub fn new(outline: Vec<OutlineNode>, latex_header: Option<&str>, config: &ProjectConfig) -> Self {
        Self {
            outline,
            latex_header: latex_header.unwrap_or_default().to_string(),
            difficulty: config.difficulty,
            writing_style: config.writing_style.clone(),
            custom_commands: config.custom_commands.clone(),
            language: config.language,
        }
    }
}

/// Output of one successful generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDraft {
    pub content: String,
    pub exercises: Vec<Exercise>,
}

/// Produces LaTeX content for a single outline node.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate content for `node`. Failures should be
    /// [`CoreError::Generation`]; the message is recorded in the task log.
    async fn generate(
        &self,
        node: &OutlineNode,
        context: &GenerationContext,
    ) -> Result<GeneratedDraft, CoreError>;
}
