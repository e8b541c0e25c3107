//! Replaying adapters that serve recorded interactions.

pub mod catalog;

pub use catalog::ReplayingIconCatalog;
