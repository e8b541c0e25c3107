//! Recording adapters that capture interactions to cassettes.

pub mod catalog;

pub use catalog::RecordingIconCatalog;
