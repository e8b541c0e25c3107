//! YAML cassettes for recording and replaying boundary interactions.

pub mod format;
pub mod recorder;
pub mod replayer;
