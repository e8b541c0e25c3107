//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipeline core and an
//! external system (filesystem, shell, time, composer, transpiler, minifier,
//! file watching, remote icon catalog). Implementations live in
//! `src/adapters/`.

pub mod catalog;
pub mod clock;
pub mod composer;
pub mod filesystem;
pub mod minifier;
pub mod shell;
pub mod transpiler;
pub mod watcher;

pub use catalog::{CatalogError, CatalogFuture, IconCatalog};
pub use clock::Clock;
pub use composer::{
    ComposeOptions, Composer, ComposerFuture, ContentHook, LoaderKind, Progress, ProgressHook,
    StringProcessor,
};
pub use filesystem::FileSystem;
pub use minifier::{Minifier, MinifyOptions};
pub use shell::{ShellExecutor, ShellOutput};
pub use transpiler::{TranspileOptions, Transpiler};
pub use watcher::{ChangeEvent, ChangeKind, FileWatcher, WatchStream};
