//! Composer port: the external engine that merges the template tree into
//! compiled modules.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by asynchronous composer operations.
pub type ComposerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Per-file script hook: receives raw template script text and its path,
/// returns the compiled module text.
pub type ContentHook = Arc<dyn Fn(&str, &Path) -> Result<String, String> + Send + Sync>;

/// Progress callback invoked once per compiled file.
pub type ProgressHook = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Callback invoked with each composer-managed string and the file it came from.
pub type StringProcessor = Arc<dyn Fn(&str, &Path) + Send + Sync>;

/// One progress notification during a full combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// File just compiled.
    pub file: PathBuf,
    /// Number of files compiled so far, including `file`.
    pub completed: usize,
    /// Total number of files in this combine.
    pub total: usize,
}

/// Module wrapper emitted around each compiled script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    /// `define("<project>/<id>", (require, exports, module) => { ... });`
    CmdEs,
    /// Module body emitted as-is.
    None,
}

impl LoaderKind {
    /// Parses a loader name as used in project options (`cmd_es`, `none`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cmd_es" => Some(Self::CmdEs),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Immutable options for one composer invocation.
///
/// Built fresh by each operation from the pipeline configuration, so a debug
/// flag chosen by one target can never leak into another.
#[derive(Clone)]
pub struct ComposeOptions {
    /// Project name, used as the module id prefix.
    pub project_name: String,
    /// Root of the template tree.
    pub template_dir: PathBuf,
    /// Root of the compiled-source tree.
    pub compiled_dir: PathBuf,
    /// Module wrapper kind.
    pub loader: LoaderKind,
    /// Debug mode: verbose progress reporting.
    pub debug: bool,
    /// Hook applied to every script file before it is written.
    pub compile_js_start: Option<ContentHook>,
    /// Progress callback, only invoked in debug mode.
    pub progress: Option<ProgressHook>,
}

impl fmt::Debug for ComposeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeOptions")
            .field("project_name", &self.project_name)
            .field("template_dir", &self.template_dir)
            .field("compiled_dir", &self.compiled_dir)
            .field("loader", &self.loader)
            .field("debug", &self.debug)
            .field("compile_js_start", &self.compile_js_start.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Merges and compiles the template tree.
///
/// Recompilation calls may overlap; each targets a disjoint output file.
pub trait Composer: Send + Sync {
    /// Compiles the entire template tree into the compiled-source tree.
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails to compile or cannot be written.
    fn combine<'a>(&'a self, options: &'a ComposeOptions) -> ComposerFuture<'a>;

    /// Recompiles exactly one template file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file fails to compile or cannot be written.
    fn recompile_file<'a>(&'a self, options: &'a ComposeOptions, path: &'a Path)
        -> ComposerFuture<'a>;

    /// Removes the compiled counterpart of a template file. Missing output is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if existing output cannot be deleted.
    fn remove_compiled_output(
        &self,
        options: &ComposeOptions,
        path: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Runs `processor` over every string the composer manages.
    ///
    /// # Errors
    ///
    /// Returns an error if template content cannot be read.
    fn process_all_strings<'a>(
        &'a self,
        options: &'a ComposeOptions,
        processor: StringProcessor,
    ) -> ComposerFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_kind_parses_known_names() {
        assert_eq!(LoaderKind::from_name("cmd_es"), Some(LoaderKind::CmdEs));
        assert_eq!(LoaderKind::from_name("none"), Some(LoaderKind::None));
        assert_eq!(LoaderKind::from_name("amd"), None);
    }
}
