//! Prompt text sent to LLM providers.

use crate::generation::GenerationContext;
use crate::outline::{OutlineLevel, OutlineNode};
use crate::outline_tree::OutlineIndex;

/// Token budget for a content generation call.
pub const CONTENT_MAX_TOKENS: u32 = 4096;

/// Token budget for an outline drafting call.
pub const OUTLINE_MAX_TOKENS: u32 = 4096;

/// Short prompt used to check that a provider answers at all.
pub const PING_PROMPT: &str = "Connection test. Reply with \"OK\".";

/// Target word range for each level, as `(min, max)`.
pub fn target_length(level: OutlineLevel) -> (u32, u32) {
    match level {
        OutlineLevel::Chapter => (1500, 2000),
        OutlineLevel::Section => (800, 1200),
        OutlineLevel::Subsection => (400, 600),
    }
}

/// Build the content prompt for one outline node.
pub fn build_content_prompt(node: &OutlineNode, context: &GenerationContext) -> String {
    let index = OutlineIndex::new(&context.outline);
    let parent = index
        .parent_of(node)
        .map(|p| p.title.as_str())
        .unwrap_or("none (top-level chapter)");
    let position = index.position_among_siblings(node).unwrap_or(1);
    let level = node.level.as_str();
    let (min_words, max_words) = target_length(node.level);

    let commands = if context.custom_commands.is_empty() {
        r"\ex, \sol".to_string()
    } else {
        context.custom_commands.join(", ")
    };
    let exercise_cmd = context
        .custom_commands
        .first()
        .map(String::as_str)
        .unwrap_or(r"\ex");
    let solution_cmd = context
        .custom_commands
        .get(1)
        .map(String::as_str)
        .unwrap_or(r"\sol");

    format!(
        "You are an expert textbook author. Write the content of the following {level}.\n\
         \n\
         Outline information:\n\
         - Title: {title}\n\
         - Level: {level}\n\
         - Parent: {parent}\n\
         - Position: {level} number {position} among its siblings\n\
         \n\
         Content requirements:\n\
         1. Difficulty: {difficulty}\n\
         2. Writing style: {style}\n\
         3. Length: {min_words}-{max_words} words\n\
         4. Language: {language}\n\
         \n\
         Formatting requirements:\n\
         1. Use standard LaTeX.\n\
         2. Use the project's custom commands ({commands}) for worked examples and their solutions:\n\
         \x20  - {exercise_cmd}{{example text}}\n\
         \x20  - {solution_cmd}{{solution text}}\n\
         3. Include 2-3 worked examples.\n\
         4. Use inline ($...$) or display (\\[...\\]) math where appropriate.\n\
         5. Include theorem, definition and similar environments where needed.\n\
         \n\
         Structure:\n\
         1. Introduction\n\
         2. Core concepts\n\
         3. Derivations (if applicable)\n\
         4. Worked examples\n\
         5. Summary\n\
         \n\
         Output only the LaTeX body for this {level}, without a preamble, \
         without \\begin{{document}}, and without any explanation.",
        title = node.title,
        difficulty = context.difficulty.label(),
        style = context.writing_style,
        language = context.language.label(),
    )
}

/// Build the prompt that turns a free-text request into a JSON outline.
pub fn build_outline_prompt(request: &str) -> String {
    format!(
        "You are an expert at designing textbook outlines. Produce a detailed outline for the request below.\n\
         \n\
         Request:\n\
         {request}\n\
         \n\
         Output requirements:\n\
         1. Output the outline as JSON.\n\
         2. Use three levels: chapter, section, subsection.\n\
         3. Every entry must have \"title\" and \"level\" fields.\n\
         4. Express nesting with a \"children\" array.\n\
         \n\
         Example:\n\
         {{\"outline\": [{{\"title\": \"Chapter 1 Newtonian Mechanics\", \"level\": \"chapter\", \"children\": [\
         {{\"title\": \"1.1 Newton's Laws\", \"level\": \"section\", \"children\": [\
         {{\"title\": \"1.1.1 The First Law\", \"level\": \"subsection\"}}]}}]}}]}}\n\
         \n\
         Output only the JSON, with no other text."
    )
}
