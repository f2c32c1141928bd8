pub mod ai;
pub mod export;
pub mod generation;
pub mod outline;
pub mod project;
