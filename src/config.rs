//! Immutable pipeline configuration.
//!
//! One [`PipelineConfig`] is built per invocation and passed by reference to
//! every operation. Variants (for instance a release build) are derived by
//! value with [`PipelineConfig::with_debug`], never by mutating shared state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ports::{ComposeOptions, LoaderKind, TranspileOptions};

/// Default remote icon catalog.
pub const DEFAULT_ICON_CATALOG_URL: &str =
    "https://www.iconfont.cn/open/project/detail.json?pid=890516";

const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

/// Fixed project layout and tool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Project root; every folder below is relative to it.
    pub root: PathBuf,
    /// Authoring-time template tree.
    pub template_folder: String,
    /// Compiled-source tree written by the composer.
    pub compiled_folder: String,
    /// Per-file minified output of `build`.
    pub build_folder: String,
    /// Bundled output of `dist`.
    pub dist_folder: String,
    /// Audit snapshots.
    pub cache_folder: String,
    /// Project name passed to the composer.
    pub project_name: String,
    /// Module wrapper emitted by the composer.
    pub loader: LoaderKind,
    /// Debug mode for composer runs.
    pub debug: bool,
    /// Canonical locale file, relative to the root.
    pub locale_file: String,
    /// Transpiler settings for template scripts.
    pub transpile: TranspileOptions,
    /// Remote icon catalog URL.
    pub icon_catalog_url: String,
    /// Timeout for the catalog request.
    pub catalog_timeout: Duration,
    /// Override for the transpile shell command (reads stdin, writes stdout).
    pub transpile_command: Option<String>,
    /// Override for the minifier program; settings flags are appended to it.
    pub minify_command: Option<String>,
}

impl PipelineConfig {
    /// Returns the fixed defaults for a project rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            template_folder: "tmpl".to_string(),
            compiled_folder: "src".to_string(),
            build_folder: "build".to_string(),
            dist_folder: "dist".to_string(),
            cache_folder: ".weave-cache".to_string(),
            project_name: "rd".to_string(),
            loader: LoaderKind::CmdEs,
            debug: true,
            locale_file: "tmpl/i18n/zh-cn.ts".to_string(),
            transpile: TranspileOptions { target: "es2018".to_string() },
            icon_catalog_url: DEFAULT_ICON_CATALOG_URL.to_string(),
            catalog_timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            transpile_command: None,
            minify_command: None,
        }
    }

    /// Builds the configuration from the process environment.
    ///
    /// Loads an optional `.env` first, then reads `WEAVE_ROOT`,
    /// `WEAVE_ICON_CATALOG_URL`, `WEAVE_CATALOG_TIMEOUT_SECS`, `WEAVE_LOADER`,
    /// `WEAVE_TRANSPILE_CMD` and `WEAVE_MINIFY_CMD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unavailable or an
    /// override is malformed.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        let cwd =
            std::env::current_dir().map_err(|e| format!("failed to get current directory: {e}"))?;
        Self::from_lookup(&cwd, |key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `WEAVE_CATALOG_TIMEOUT_SECS` is not a positive integer
    /// or `WEAVE_LOADER` names an unknown loader.
    pub fn from_lookup<F>(default_root: &Path, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = lookup("WEAVE_ROOT").map_or_else(|| default_root.to_path_buf(), PathBuf::from);
        let mut config = Self::new(root);

        if let Some(url) = lookup("WEAVE_ICON_CATALOG_URL") {
            config.icon_catalog_url = url;
        }
        if let Some(raw) = lookup("WEAVE_CATALOG_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| format!("invalid WEAVE_CATALOG_TIMEOUT_SECS {raw:?}: {e}"))?;
            if secs == 0 {
                return Err("WEAVE_CATALOG_TIMEOUT_SECS must be greater than zero".to_string());
            }
            config.catalog_timeout = Duration::from_secs(secs);
        }
        if let Some(name) = lookup("WEAVE_LOADER") {
            config.loader = LoaderKind::from_name(name.trim())
                .ok_or_else(|| format!("unknown WEAVE_LOADER {name:?} (expected cmd_es or none)"))?;
        }
        config.transpile_command = lookup("WEAVE_TRANSPILE_CMD").filter(|c| !c.trim().is_empty());
        config.minify_command = lookup("WEAVE_MINIFY_CMD").filter(|c| !c.trim().is_empty());
        Ok(config)
    }

    /// Returns a copy with the debug flag set to `debug`.
    #[must_use]
    pub fn with_debug(&self, debug: bool) -> Self {
        Self { debug, ..self.clone() }
    }

    /// Composer options for this configuration, without hooks.
    #[must_use]
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            project_name: self.project_name.clone(),
            template_dir: self.template_dir(),
            compiled_dir: self.compiled_dir(),
            loader: self.loader,
            debug: self.debug,
            compile_js_start: None,
            progress: None,
        }
    }

    /// Absolute path of the template tree.
    #[must_use]
    pub fn template_dir(&self) -> PathBuf {
        self.root.join(&self.template_folder)
    }

    /// Absolute path of the compiled-source tree.
    #[must_use]
    pub fn compiled_dir(&self) -> PathBuf {
        self.root.join(&self.compiled_folder)
    }

    /// Absolute path of the build-output tree.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.build_folder)
    }

    /// Absolute path of the distribution tree.
    #[must_use]
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(&self.dist_folder)
    }

    /// Absolute path of the audit snapshot folder.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.cache_folder)
    }

    /// Absolute path of the canonical locale file.
    #[must_use]
    pub fn locale_path(&self) -> PathBuf {
        self.root.join(&self.locale_file)
    }
}
