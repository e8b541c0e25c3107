//! In-memory doubles of the port traits shared by unit tests.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::adapters::live::composer::LocalComposer;
use crate::context::ServiceContext;
use crate::ports::catalog::{CatalogError, CatalogFuture, IconCatalog};
use crate::ports::clock::Clock;
use crate::ports::composer::{ComposeOptions, Composer, ComposerFuture, StringProcessor};
use crate::ports::filesystem::FileSystem;
use crate::ports::minifier::{Minifier, MinifyOptions};
use crate::ports::transpiler::{TranspileOptions, Transpiler};
use crate::ports::watcher::{ChangeEvent, FileWatcher, WatchStream};

/// Prologue the TypeScript compiler emits for module output.
pub(crate) const TS_PROLOGUE: &str =
    "\"use strict\";\nObject.defineProperty(exports, \"__esModule\", { value: true });\n";

/// Context over `fs` with a local composer and scripted doubles for every
/// other port.
pub(crate) fn context(fs: Arc<MemFs>) -> ServiceContext {
    ServiceContext {
        fs: fs.clone(),
        clock: Arc::new(FixedClock::at(9, 30, 0)),
        composer: Arc::new(LocalComposer::new(fs)),
        transpiler: Arc::new(StubTranspiler),
        minifier: Arc::new(StubMinifier::default()),
        watcher: Box::new(QueuedWatcher::new(Vec::new())),
        catalog: Box::new(StaticCatalog::ok(r#"{"data":{"icons":[]}}"#)),
    }
}

/// In-memory filesystem for exercising the pipeline without touching disk.
pub(crate) struct MemFs {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemFs {
    pub(crate) fn new() -> Self {
        Self { files: Mutex::new(BTreeMap::new()) }
    }

    pub(crate) fn seed(&self, path: &str, contents: &str) {
        self.seed_bytes(path, contents.as_bytes());
    }

    pub(crate) fn seed_bytes(&self, path: &str, contents: &[u8]) {
        self.files.lock().unwrap().insert(PathBuf::from(path), contents.to_vec());
    }

    /// Every stored file path below `root`, as strings.
    pub(crate) fn paths_under(&self, root: &str) -> Vec<String> {
        let files = self.files.lock().unwrap();
        files
            .keys()
            .filter(|k| k.starts_with(root))
            .map(|k| k.to_string_lossy().into_owned())
            .collect()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write_bytes(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write_bytes(path, contents.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.keys().any(|k| k.starts_with(path))
    }

    fn walk(&self, root: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        Ok(files.keys().filter(|k| k.starts_with(root)).cloned().collect())
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn remove_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().retain(|k, _| !k.starts_with(path));
        Ok(())
    }
}

/// Clock frozen at a fixed instant.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(hour: u32, minute: u32, second: u32) -> Self {
        Self(Utc.with_ymd_and_hms(2025, 6, 15, hour, minute, second).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Transpiler that prepends the compiler's module prologue and otherwise
/// returns the source unchanged. Sources containing `SYNTAX ERROR` fail.
pub(crate) struct StubTranspiler;

impl Transpiler for StubTranspiler {
    fn transpile(
        &self,
        source: &str,
        _options: &TranspileOptions,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        if source.contains("SYNTAX ERROR") {
            return Err("unexpected token".into());
        }
        Ok(format!("{TS_PROLOGUE}{source}"))
    }
}

/// Minifier that wraps its input in `min(...)` and records the settings used.
#[derive(Default)]
pub(crate) struct StubMinifier {
    pub(crate) calls: Mutex<Vec<MinifyOptions>>,
}

impl Minifier for StubMinifier {
    fn minify(
        &self,
        source: &str,
        options: &MinifyOptions,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.calls.lock().unwrap().push(options.clone());
        Ok(format!("min({})", source.trim()))
    }
}

/// Catalog returning a canned result.
pub(crate) struct StaticCatalog(pub(crate) Result<String, CatalogError>);

impl StaticCatalog {
    pub(crate) fn ok(body: &str) -> Self {
        Self(Ok(body.to_string()))
    }
}

impl IconCatalog for StaticCatalog {
    fn fetch(&self) -> CatalogFuture<'_> {
        let result = self.0.clone();
        Box::pin(async move { result })
    }
}

/// Watcher that replays a fixed list of events and then closes.
pub(crate) struct QueuedWatcher {
    receiver: Mutex<Option<UnboundedReceiver<ChangeEvent>>>,
}

impl QueuedWatcher {
    pub(crate) fn new(events: Vec<ChangeEvent>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            tx.send(event).unwrap();
        }
        Self { receiver: Mutex::new(Some(rx)) }
    }
}

impl FileWatcher for QueuedWatcher {
    fn watch(&self, _root: &Path) -> Result<WatchStream, Box<dyn Error + Send + Sync>> {
        let rx = self.receiver.lock().unwrap().take().ok_or("already watching")?;
        Ok(WatchStream::from_receiver(rx))
    }
}

/// Composer that only logs which operations were requested.
#[derive(Default)]
pub(crate) struct CallLogComposer {
    pub(crate) calls: Mutex<Vec<String>>,
    /// Recompiling a path containing this text fails.
    pub(crate) fail_on: Option<String>,
}

impl CallLogComposer {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Composer for CallLogComposer {
    fn combine<'a>(&'a self, options: &'a ComposeOptions) -> ComposerFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(format!("combine debug={}", options.debug));
            Ok(())
        })
    }

    fn recompile_file<'a>(
        &'a self,
        _options: &'a ComposeOptions,
        path: &'a Path,
    ) -> ComposerFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(format!("recompile {}", path.display()));
            match &self.fail_on {
                Some(marker) if path.to_string_lossy().contains(marker.as_str()) => {
                    Err(format!("failed to compile {}", path.display()).into())
                }
                _ => Ok(()),
            }
        })
    }

    fn remove_compiled_output(
        &self,
        _options: &ComposeOptions,
        path: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.calls.lock().unwrap().push(format!("remove {}", path.display()));
        Ok(())
    }

    fn process_all_strings<'a>(
        &'a self,
        _options: &'a ComposeOptions,
        _processor: StringProcessor,
    ) -> ComposerFuture<'a> {
        Box::pin(async { Ok(()) })
    }
}
