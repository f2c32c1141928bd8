//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and partial updates where the entity
//!   is user-editable

pub mod chapter_content;
pub mod outline;
pub mod project;
pub mod task_log;
