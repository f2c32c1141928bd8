//! The sequential generation loop.
//!
//! 1. Load the project and its outline (fails before any status change if
//!    either is missing or the outline is empty).
//! 2. Mark the project `generating` and log the start.
//! 3. For each item in stored order: generate, upsert the content, flag the
//!    item as generated, and log it.
//! 4. When every item succeeds, the project ends `completed`.
//! 5. The first failure, including a failed final status write, stops the
//!    run, marks the project `error` and writes exactly one
//!    `generation_error` log.

use serde::Serialize;
use serde_json::json;
use texbook_core::error::CoreError;
use texbook_core::exercises::word_count;
use texbook_core::generation::{ContentGenerator, GenerationContext};
use texbook_core::outline::OutlineNode;
use texbook_core::project::{
    ContentStatus, ProjectStatus, TaskRole, ACTION_CONTENT_GENERATED, ACTION_GENERATION_COMPLETED,
    ACTION_GENERATION_ERROR, ACTION_GENERATION_STARTED,
};
use texbook_db::models::chapter_content::UpsertChapterContent;
use texbook_db::models::project::Project;
use texbook_db::models::task_log::CreateTaskLog;
use texbook_db::repositories::{ChapterContentRepo, OutlineRepo, ProjectRepo, TaskLogRepo};
use texbook_db::DbPool;

use crate::error::{AppError, AppResult};

/// Result of a completed generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub project_id: String,
    pub status: ProjectStatus,
    pub generated: usize,
}

/// Generate content for every outline item of `project_id`.
///
/// On failure the project is left in `error` status and the returned error
/// is a [`CoreError::Generation`] carrying the original message.
pub async fn run_generation(
    pool: &DbPool,
    generator: &dyn ContentGenerator,
    project_id: &str,
) -> AppResult<GenerationSummary> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    let outline: Vec<OutlineNode> = OutlineRepo::list_by_project(pool, project_id)
        .await?
        .into_iter()
        .map(OutlineNode::from)
        .collect();

    if outline.is_empty() {
        return Err(CoreError::Validation("No outline items found".to_string()).into());
    }

    ProjectRepo::set_status(pool, project_id, ProjectStatus::Generating).await?;
    tracing::info!(project_id, outline_count = outline.len(), "Generation started");

    let outcome = match generate_all(pool, generator, &project, outline).await {
        Ok(generated) => ProjectRepo::set_status(pool, project_id, ProjectStatus::Completed)
            .await
            .map(|_| generated)
            .map_err(AppError::from),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(generated) => {
            tracing::info!(project_id, generated, "Generation completed");
            Ok(GenerationSummary {
                project_id: project_id.to_string(),
                status: ProjectStatus::Completed,
                generated,
            })
        }
        Err(err) => {
            let message = failure_message(&err);
            tracing::error!(project_id, error = %message, "Generation failed");
            record_failure(pool, project_id, &message).await;
            Err(CoreError::Generation(message).into())
        }
    }
}

/// The loop body. Returns the number of items generated.
async fn generate_all(
    pool: &DbPool,
    generator: &dyn ContentGenerator,
    project: &Project,
    outline: Vec<OutlineNode>,
) -> AppResult<usize> {
    let count = outline.len();

    TaskLogRepo::create(
        pool,
        &CreateTaskLog::new(&project.id, TaskRole::Coordinator, ACTION_GENERATION_STARTED)
            .with_content(format!("Starting generation for {count} outline items"))
            .with_metadata(json!({ "outline_count": count })),
    )
    .await?;

    let context = GenerationContext::new(outline, project.latex_header.as_deref(), &project.config.0);

    for node in &context.outline {
        tracing::debug!(outline_id = %node.id, title = %node.title, "Generating content");

        let draft = generator.generate(node, &context).await?;

        ChapterContentRepo::upsert(
            pool,
            &UpsertChapterContent {
                outline_id: node.id.clone(),
                word_count: word_count(&draft.content),
                content: Some(draft.content),
                exercises: draft.exercises,
                status: ContentStatus::Completed,
            },
        )
        .await?;

        OutlineRepo::mark_content_generated(pool, &node.id).await?;

        TaskLogRepo::create(
            pool,
            &CreateTaskLog::new(&project.id, TaskRole::Writer, ACTION_CONTENT_GENERATED)
                .with_content(format!("Generated content for: {}", node.title))
                .with_metadata(json!({ "outline_id": node.id })),
        )
        .await?;
    }

    TaskLogRepo::create(
        pool,
        &CreateTaskLog::new(&project.id, TaskRole::Coordinator, ACTION_GENERATION_COMPLETED)
            .with_content(format!("Generated content for {count} outline items")),
    )
    .await?;

    Ok(count)
}

/// The message stored in the error log: the generator's own message for
/// generation failures, the display text otherwise.
fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Core(CoreError::Generation(msg)) => msg.clone(),
        other => other.to_string(),
    }
}

/// Flip the project to `error` and append the error log. Failures here are
/// logged and swallowed so the original error reaches the caller.
async fn record_failure(pool: &DbPool, project_id: &str, message: &str) {
    if let Err(e) = ProjectRepo::set_status(pool, project_id, ProjectStatus::Error).await {
        tracing::error!(project_id, error = %e, "Failed to set project error status");
    }

    let log = CreateTaskLog::new(project_id, TaskRole::Coordinator, ACTION_GENERATION_ERROR)
        .with_content(message);
    if let Err(e) = TaskLogRepo::create(pool, &log).await {
        tracing::error!(project_id, error = %e, "Failed to record generation error");
    }
}
