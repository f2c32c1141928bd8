//! Content generation engine.
//!
//! Runs the per-project generation loop inside the request that started it:
//! every outline item is generated in order, persisted, and logged.

pub mod generation;
