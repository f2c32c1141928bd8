//! Project-level enums, generation settings, and task-log vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Define a fieldless enum stored as TEXT, with its wire strings given
/// per variant. Generates `as_str`, `Display`, `FromStr`, `TryFrom<String>`
/// (for `#[sqlx(try_from = "String")]` row fields) and serde impls.
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Database / wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, CoreError> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Project lifecycle status.
    #[derive(Default)]
    ProjectStatus {
        #[default]
        Draft => "draft",
        Generating => "generating",
        Completed => "completed",
        Error => "error",
    }
}

define_text_enum! {
    /// Status of one node's generated content.
    #[derive(Default)]
    ContentStatus {
        #[default]
        Pending => "pending",
        Generating => "generating",
        Completed => "completed",
        Error => "error",
    }
}

define_text_enum! {
    /// Target audience of the textbook.
    #[derive(Default)]
    Difficulty {
        HighSchool => "high-school",
        #[default]
        Undergraduate => "undergraduate",
        Graduate => "graduate",
    }
}

define_text_enum! {
    /// Language the content is written in.
    #[derive(Default)]
    Language {
        En => "en",
        #[default]
        Zh => "zh",
    }
}

define_text_enum! {
    /// Which agent role a task-log entry is attributed to.
    TaskRole {
        Coordinator => "coordinator",
        Writer => "writer",
        Reviewer => "reviewer",
        Researcher => "researcher",
    }
}

impl Difficulty {
    /// Human-readable label used in prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::HighSchool => "high school",
            Self::Undergraduate => "undergraduate",
            Self::Graduate => "graduate",
        }
    }
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "Chinese",
        }
    }
}

// ---------------------------------------------------------------------------
// Task-log actions
// ---------------------------------------------------------------------------

pub const ACTION_GENERATION_STARTED: &str = "generation_started";
pub const ACTION_CONTENT_GENERATED: &str = "content_generated";
pub const ACTION_GENERATION_COMPLETED: &str = "generation_completed";
pub const ACTION_GENERATION_ERROR: &str = "generation_error";

/// Default page size for task-log listings.
pub const DEFAULT_LOG_LIMIT: i64 = 100;

/// Upper bound for task-log listings.
pub const MAX_LOG_LIMIT: i64 = 1000;

/// Clamp a requested log limit into `1..=MAX_LOG_LIMIT`.
pub fn clamp_log_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
}

// ---------------------------------------------------------------------------
// Generation settings
// ---------------------------------------------------------------------------

/// Per-project generation settings, stored as JSON on the project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub difficulty: Difficulty,
    #[serde(alias = "writingStyle")]
    pub writing_style: String,
    /// LaTeX commands the generator must use for exercises and solutions.
    #[serde(alias = "customCommands")]
    pub custom_commands: Vec<String>,
    pub language: Language,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            writing_style: "academic".to_string(),
            custom_commands: vec![r"\ex".to_string(), r"\sol".to_string()],
            language: Language::default(),
        }
    }
}
