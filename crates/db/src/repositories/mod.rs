//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Statements use `?N`
//! placeholders so a parameter can appear out of order or more than once.

pub mod chapter_content_repo;
pub mod outline_repo;
pub mod project_repo;
pub mod task_log_repo;

pub use chapter_content_repo::ChapterContentRepo;
pub use outline_repo::OutlineRepo;
pub use project_repo::ProjectRepo;
pub use task_log_repo::TaskLogRepo;
