//! Build operations over the composer, normalizer and minifier.
//!
//! Every recompiling operation deletes its output trees before compiling, so
//! no file removed from the template tree survives in the compiled tree.

use std::path::Path;
use std::sync::Arc;

use crate::audit::display_relative;
use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::normalize::normalize;
use crate::pipeline::targets::{BuildTarget, BUNDLES};
use crate::ports::composer::{ComposeOptions, ContentHook, Progress, ProgressHook};
use crate::ports::minifier::MinifyOptions;

/// Runs the named build targets against one project.
pub struct Orchestrator<'a> {
    ctx: &'a ServiceContext,
    config: &'a PipelineConfig,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator over `ctx` for the project described by `config`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a PipelineConfig) -> Self {
        Self { ctx, config }
    }

    /// Composer options for `config`, with the transpile-and-normalize hook
    /// and, in debug mode, a progress printer.
    #[must_use]
    pub fn compose_options(&self, config: &PipelineConfig) -> ComposeOptions {
        let mut options = config.compose_options();
        options.compile_js_start = Some(script_hook(self.ctx, config));
        if config.debug {
            let root = config.root.clone();
            let progress: ProgressHook = Arc::new(move |p: &Progress| {
                println!("{} {}/{}", display_relative(&p.file, &root), p.completed, p.total);
            });
            options.progress = Some(progress);
        }
        options
    }

    /// Deletes the build-output tree. Missing trees are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing tree cannot be deleted.
    pub fn clean_build(&self) -> Result<(), String> {
        self.remove_tree(&self.config.build_dir())
    }

    /// Deletes the compiled-source tree. Missing trees are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing tree cannot be deleted.
    pub fn clean_src(&self) -> Result<(), String> {
        self.remove_tree(&self.config.compiled_dir())
    }

    fn clean_dist(&self) -> Result<(), String> {
        self.remove_tree(&self.config.dist_dir())
    }

    fn remove_tree(&self, dir: &Path) -> Result<(), String> {
        self.ctx
            .fs
            .remove_dir_all(dir)
            .map_err(|e| format!("failed to delete {}: {e}", dir.display()))
    }

    /// Recompiles the template tree in debug mode.
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning fails or the composer fails.
    pub async fn combine(&self) -> Result<(), String> {
        self.clean_src()?;
        self.compile(BuildTarget::Combine).await?;
        println!("complete");
        Ok(())
    }

    /// Recompiles in release mode and minifies every compiled script into the
    /// build-output tree, one output file per input file.
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning, compiling, minifying or writing fails.
    pub async fn build(&self) -> Result<(), String> {
        self.clean_build()?;
        self.clean_src()?;
        self.compile(BuildTarget::Build).await?;

        let compiled_dir = self.config.compiled_dir();
        let build_dir = self.config.build_dir();
        let settings = MinifyOptions::release();
        let scripts = self.compiled_scripts()?;
        for rel in &scripts {
            let source = self.read(&compiled_dir.join(rel))?;
            let minified = self.minify(&source, &settings, rel)?;
            self.write(&build_dir.join(rel), &minified)?;
        }
        println!(
            "{}: {} file(s) written to {}",
            BuildTarget::Build,
            scripts.len(),
            self.shown(&build_dir)
        );
        Ok(())
    }

    /// Recompiles in release mode and writes each distribution bundle as one
    /// concatenated, ASCII-only minified file.
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning, compiling, selecting, minifying or
    /// writing fails.
    pub async fn dist(&self) -> Result<(), String> {
        self.clean_src()?;
        self.clean_dist()?;
        self.compile(BuildTarget::Dist).await?;

        let compiled_dir = self.config.compiled_dir();
        let dist_dir = self.config.dist_dir();
        let settings = MinifyOptions::release().with_ascii_only();
        let scripts = self.compiled_scripts()?;
        for bundle in BUNDLES {
            let members = bundle.selection()?.select(&scripts);
            let mut parts = Vec::with_capacity(members.len());
            for rel in &members {
                parts.push(self.read(&compiled_dir.join(rel))?);
            }
            let minified = self.minify(&parts.join("\n"), &settings, bundle.name)?;
            let out = dist_dir.join(bundle.name);
            self.write(&out, &minified)?;
            println!("{}: {} <- {} file(s)", BuildTarget::Dist, self.shown(&out), members.len());
        }
        Ok(())
    }

    /// Re-minifies the top-level distribution scripts in place.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundle cannot be read, minified or written.
    pub fn cdist(&self) -> Result<(), String> {
        let dist_dir = self.config.dist_dir();
        let settings = MinifyOptions::release().with_ascii_only();
        let files = self
            .ctx
            .fs
            .walk(&dist_dir)
            .map_err(|e| format!("failed to walk {}: {e}", dist_dir.display()))?;

        let mut count = 0;
        for file in files {
            let top_level = file.parent() == Some(dist_dir.as_path());
            if !top_level || !is_js(&file) {
                continue;
            }
            let source = self.read(&file)?;
            let minified = self.minify(&source, &settings, &self.shown(&file))?;
            self.write(&file, &minified)?;
            count += 1;
        }
        println!(
            "{}: {count} file(s) re-minified in {}",
            BuildTarget::Cdist,
            self.shown(&dist_dir)
        );
        Ok(())
    }

    async fn compile(&self, target: BuildTarget) -> Result<(), String> {
        let config = self.config.with_debug(target.debug());
        let options = self.compose_options(&config);
        self.ctx
            .composer
            .combine(&options)
            .await
            .map_err(|e| format!("{target} failed: {e}"))
    }

    /// Compiled `.js` files, relative to the compiled folder with `/` separators.
    fn compiled_scripts(&self) -> Result<Vec<String>, String> {
        let compiled_dir = self.config.compiled_dir();
        let files = self
            .ctx
            .fs
            .walk(&compiled_dir)
            .map_err(|e| format!("failed to walk {}: {e}", compiled_dir.display()))?;
        Ok(files
            .iter()
            .filter(|f| is_js(f))
            .filter_map(|f| f.strip_prefix(&compiled_dir).ok())
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String, String> {
        self.ctx
            .fs
            .read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), String> {
        self.ctx
            .fs
            .write(path, contents)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))
    }

    fn minify(&self, source: &str, settings: &MinifyOptions, what: &str) -> Result<String, String> {
        self.ctx
            .minifier
            .minify(source, settings)
            .map_err(|e| format!("failed to minify {what}: {e}"))
    }

    fn shown(&self, path: &Path) -> String {
        display_relative(path, &self.config.root)
    }
}

/// Transpiles a template script and normalizes the output.
fn script_hook(ctx: &ServiceContext, config: &PipelineConfig) -> ContentHook {
    let transpiler = Arc::clone(&ctx.transpiler);
    let settings = config.transpile.clone();
    Arc::new(move |source: &str, _path: &Path| {
        let output = transpiler.transpile(source, &settings).map_err(|e| e.to_string())?;
        Ok(normalize(&output))
    })
}

fn is_js(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "js")
}
