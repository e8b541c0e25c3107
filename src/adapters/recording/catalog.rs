//! Recording adapter for the `IconCatalog` port.

use std::sync::Mutex;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::catalog::{CatalogFuture, IconCatalog};

/// Records catalog responses while delegating to an inner implementation.
///
/// The cassette is rewritten after every fetch, so a single-fetch audit
/// leaves a complete file behind.
pub struct RecordingIconCatalog {
    inner: Box<dyn IconCatalog>,
    recorder: Mutex<CassetteRecorder>,
}

impl RecordingIconCatalog {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn IconCatalog>, recorder: CassetteRecorder) -> Self {
        Self { inner, recorder: Mutex::new(recorder) }
    }
}

impl IconCatalog for RecordingIconCatalog {
    fn fetch(&self) -> CatalogFuture<'_> {
        Box::pin(async move {
            let result = self.inner.fetch().await;
            let mut recorder = self.recorder.lock().expect("recorder lock poisoned");
            recorder.record_fetch(&result);
            if let Err(e) = recorder.flush() {
                eprintln!("Warning: {e}");
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::ports::catalog::CatalogError;
    use crate::testing::StaticCatalog;
    use serde_json::json;

    #[tokio::test]
    async fn records_success_and_failure() {
        let dir = std::env::temp_dir().join("weave_rec_catalog_test");
        let _ = std::fs::remove_dir_all(&dir);
        let ok_path = dir.join("ok.cassette.yaml");
        let err_path = dir.join("err.cassette.yaml");

        let ok = RecordingIconCatalog::new(
            Box::new(StaticCatalog(Ok("{\"data\":{\"icons\":[]}}".into()))),
            CassetteRecorder::new(&ok_path, "ok", "test"),
        );
        assert!(ok.fetch().await.is_ok());

        let err = RecordingIconCatalog::new(
            Box::new(StaticCatalog(Err(CatalogError::Status(503)))),
            CassetteRecorder::new(&err_path, "err", "test"),
        );
        assert_eq!(err.fetch().await.unwrap_err(), CatalogError::Status(503));

        let ok_cassette = Cassette::load(&ok_path).unwrap();
        assert_eq!(ok_cassette.interactions[0].output, json!({"ok": "{\"data\":{\"icons\":[]}}"}));
        let err_cassette = Cassette::load(&err_path).unwrap();
        assert_eq!(
            err_cassette.interactions[0].output,
            json!({"err": "icon catalog responded with HTTP 503"})
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
