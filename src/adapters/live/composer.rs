//! Local composer: a minimal in-process implementation of the `Composer` port.
//!
//! Script files (`.ts`, `.js`) pass through the configured
//! `compile_js_start` hook and are written as `.js`, wrapped for the
//! configured loader. Every other template file is copied verbatim.

use std::error::Error;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::ports::composer::{
    ComposeOptions, Composer, ComposerFuture, LoaderKind, Progress, StringProcessor,
};
use crate::ports::filesystem::FileSystem;

const SCRIPT_EXTENSIONS: &[&str] = &["ts", "js"];

lazy_static! {
    /// Single-, double- or back-quoted string literal with escapes.
    static ref STRING_LITERAL: Regex = Regex::new(
        r#""((?:[^"\\\n]|\\.)*)"|'((?:[^'\\\n]|\\.)*)'|`((?:[^`\\]|\\.)*)`"#
    )
    .expect("valid string literal pattern");
}

/// Composer that compiles the template tree file by file through a [`FileSystem`].
pub struct LocalComposer {
    fs: Arc<dyn FileSystem>,
}

impl LocalComposer {
    /// Creates a composer reading and writing through `fs`.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    async fn compile(
        &self,
        options: &ComposeOptions,
        path: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let fs = Arc::clone(&self.fs);
        let options = options.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || compile_one(fs.as_ref(), &options, &path)).await?
    }
}

/// Compiles one template file. Blocks on the script hook, which may run an
/// external process, so callers drive it from the blocking pool.
fn compile_one(
    fs: &dyn FileSystem,
    options: &ComposeOptions,
    path: &Path,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let rel = relative_to_template(options, path)?;
    let output = output_path(options, rel);

    if !is_script(rel) {
        let bytes = fs.read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        return fs.write_bytes(&output, &bytes);
    }
    let content = fs
        .read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let body = match &options.compile_js_start {
        Some(hook) => {
            hook(&content, path).map_err(|e| format!("failed to compile {}: {e}", path.display()))?
        }
        None => content,
    };
    fs.write(&output, &wrap_module(options, rel, &body))
}

fn relative_to_template<'p>(
    options: &ComposeOptions,
    path: &'p Path,
) -> Result<&'p Path, Box<dyn Error + Send + Sync>> {
    path.strip_prefix(&options.template_dir).map_err(|_| {
        format!(
            "{} is outside the template tree {}",
            path.display(),
            options.template_dir.display()
        )
        .into()
    })
}

fn is_script(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str).is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

/// Compiled counterpart of a template-relative path.
fn output_path(options: &ComposeOptions, rel: &Path) -> PathBuf {
    let out = options.compiled_dir.join(rel);
    if is_script(rel) {
        out.with_extension("js")
    } else {
        out
    }
}

fn module_id(options: &ComposeOptions, rel: &Path) -> String {
    let stem = rel.with_extension("");
    format!("{}/{}", options.project_name, stem.to_string_lossy().replace('\\', "/"))
}

fn wrap_module(options: &ComposeOptions, rel: &Path, body: &str) -> String {
    match options.loader {
        LoaderKind::CmdEs => format!(
            "define(\"{}\", (require, exports, module) => {{\n{}\n}});\n",
            module_id(options, rel),
            body.trim_end()
        ),
        LoaderKind::None => body.to_string(),
    }
}

impl Composer for LocalComposer {
    fn combine<'a>(&'a self, options: &'a ComposeOptions) -> ComposerFuture<'a> {
        Box::pin(async move {
            let files = self.fs.walk(&options.template_dir)?;
            let total = files.len();
            for (index, file) in files.iter().enumerate() {
                self.compile(options, file).await?;
                if options.debug {
                    if let Some(progress) = &options.progress {
                        progress(&Progress { file: file.clone(), completed: index + 1, total });
                    }
                }
            }
            Ok(())
        })
    }

    fn recompile_file<'a>(
        &'a self,
        options: &'a ComposeOptions,
        path: &'a Path,
    ) -> ComposerFuture<'a> {
        Box::pin(self.compile(options, path))
    }

    fn remove_compiled_output(
        &self,
        options: &ComposeOptions,
        path: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let rel = relative_to_template(options, path)?;
        self.fs.remove_file(&output_path(options, rel))
    }

    fn process_all_strings<'a>(
        &'a self,
        options: &'a ComposeOptions,
        processor: StringProcessor,
    ) -> ComposerFuture<'a> {
        Box::pin(async move {
            for file in self.fs.walk(&options.template_dir)? {
                if !is_script(&file) {
                    continue;
                }
                let content = self.fs.read_lossy(&file)?;
                for caps in STRING_LITERAL.captures_iter(&content) {
                    let literal = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3));
                    if let Some(literal) = literal {
                        processor(literal.as_str(), &file);
                    }
                }
            }
            Ok(())
        })
    }
}
