//! Domain types and pure logic for the textbook generator.
//!
//! Nothing in this crate touches the database or the network: the outline
//! tree, the LaTeX assembler, exercise extraction and prompt text all work
//! on plain data so they can be unit tested directly.

pub mod error;
pub mod exercises;
pub mod generation;
pub mod latex;
pub mod outline;
pub mod outline_draft;
pub mod outline_tree;
pub mod project;
pub mod prompt;
pub mod types;
