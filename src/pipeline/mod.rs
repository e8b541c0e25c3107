//! Build pipeline: file selection, named targets, and the orchestrator that
//! sequences clean, compile, minify and concatenate.

pub mod glob;
pub mod orchestrator;
pub mod targets;

pub use glob::{Pattern, Selection};
pub use orchestrator::Orchestrator;
pub use targets::{BuildTarget, Bundle, BUNDLES};
