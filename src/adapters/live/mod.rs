//! Live adapters for real external interactions.

pub mod catalog;
pub mod clock;
pub mod composer;
pub mod filesystem;
pub mod minifier;
pub mod shell;
pub mod transpiler;
pub mod watcher;
