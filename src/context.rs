//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::catalog::LiveIconCatalog;
use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::composer::LocalComposer;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::minifier::LiveMinifier;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::live::transpiler::LiveTranspiler;
use crate::adapters::live::watcher::LiveFileWatcher;
use crate::adapters::recording::RecordingIconCatalog;
use crate::adapters::replaying::ReplayingIconCatalog;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::PipelineConfig;
use crate::ports::catalog::IconCatalog;
use crate::ports::clock::Clock;
use crate::ports::composer::Composer;
use crate::ports::filesystem::FileSystem;
use crate::ports::minifier::Minifier;
use crate::ports::shell::ShellExecutor;
use crate::ports::transpiler::Transpiler;
use crate::ports::watcher::FileWatcher;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Ports that are
/// captured by hooks or spawned tasks are reference-counted.
pub struct ServiceContext {
    /// Filesystem for reading, writing, walking and deleting trees.
    pub fs: Arc<dyn FileSystem>,
    /// Clock for log timestamps and snapshot stamps.
    pub clock: Arc<dyn Clock>,
    /// Composer that compiles the template tree.
    pub composer: Arc<dyn Composer>,
    /// Transpiler invoked from the composer's script hook.
    pub transpiler: Arc<dyn Transpiler>,
    /// Minifier for build and distribution output.
    pub minifier: Arc<dyn Minifier>,
    /// File-change subscription for watch mode.
    pub watcher: Box<dyn FileWatcher>,
    /// Remote icon catalog.
    pub catalog: Box<dyn IconCatalog>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live(config: &PipelineConfig) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(LiveFileSystem);
        let shell: Arc<dyn ShellExecutor> = Arc::new(LiveShellExecutor);

        Self {
            fs: Arc::clone(&fs),
            clock: Arc::new(LiveClock),
            composer: Arc::new(LocalComposer::new(fs)),
            transpiler: Arc::new(LiveTranspiler::new(
                Arc::clone(&shell),
                config.transpile_command.clone(),
            )),
            minifier: Arc::new(LiveMinifier::new(shell, config.minify_command.clone())),
            watcher: Box::new(LiveFileWatcher),
            catalog: Box::new(LiveIconCatalog::new(
                config.icon_catalog_url.clone(),
                config.catalog_timeout,
            )),
        }
    }

    /// Creates a live context whose catalog response is recorded to `path`.
    #[must_use]
    pub fn recording(config: &PipelineConfig, path: &Path) -> Self {
        let mut ctx = Self::live(config);
        let live = std::mem::replace(&mut ctx.catalog, Box::new(NoCatalog));
        let recorder = CassetteRecorder::new(path, "icons-check", config.icon_catalog_url.clone());
        ctx.catalog = Box::new(RecordingIconCatalog::new(live, recorder));
        ctx
    }

    /// Creates a live context whose catalog is served from the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(config: &PipelineConfig, path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let mut ctx = Self::live(config);
        ctx.catalog = Box::new(ReplayingIconCatalog::new(CassetteReplayer::new(&cassette)));
        Ok(ctx)
    }
}

/// Placeholder catalog used only while swapping adapters.
struct NoCatalog;

impl IconCatalog for NoCatalog {
    fn fetch(&self) -> crate::ports::catalog::CatalogFuture<'_> {
        Box::pin(async {
            Err(crate::ports::catalog::CatalogError::Network("no catalog configured".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn replaying_context_serves_catalog_from_cassette() {
        let dir = std::env::temp_dir().join("weave_ctx_replay_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.cassette.yaml");
        let cassette = Cassette {
            name: "icons-check".into(),
            recorded_at: Utc::now(),
            source: "https://example.com".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "catalog".into(),
                method: "fetch".into(),
                input: json!({}),
                output: json!({"ok": "{\"data\":{\"icons\":[]}}"}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&PipelineConfig::new(&dir), &path).unwrap();
        assert_eq!(ctx.catalog.fetch().await.unwrap(), "{\"data\":{\"icons\":[]}}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_context_requires_readable_cassette() {
        let result = ServiceContext::replaying(
            &PipelineConfig::new("/project"),
            Path::new("/nonexistent/catalog.cassette.yaml"),
        );
        assert!(result.is_err());
    }
}
