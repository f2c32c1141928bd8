//! Exercise extraction from generated LaTeX.
//!
//! Generated content marks worked examples with `\ex{...}` and their
//! answers with `\sol{...}`. The n-th exercise is paired with the n-th
//! solution; unmatched markers on either side are dropped. Arguments are
//! matched up to the first closing brace, so nested braces are cut short.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EXERCISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\ex\{([^}]+)\}").expect("valid exercise regex"));

static SOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\sol\{([^}]+)\}").expect("valid solution regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One question/solution pair pulled out of generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub question: String,
    pub solution: String,
    pub difficulty: ExerciseDifficulty,
}

/// Pair every `\ex{}` with the `\sol{}` at the same position.
pub fn extract_exercises(content: &str) -> Vec<Exercise> {
    let questions = EXERCISE_RE.captures_iter(content).map(|c| c[1].to_string());
    let solutions = SOLUTION_RE.captures_iter(content).map(|c| c[1].to_string());

    questions
        .zip(solutions)
        .enumerate()
        .map(|(i, (question, solution))| Exercise {
            id: format!("ex-{}", i + 1),
            question,
            solution,
            difficulty: ExerciseDifficulty::default(),
        })
        .collect()
}

/// Whitespace-separated token count stored alongside content.
pub fn word_count(content: &str) -> i64 {
    content.split_whitespace().count() as i64
}
