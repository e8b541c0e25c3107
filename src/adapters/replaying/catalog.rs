//! Replaying adapter for the `IconCatalog` port.

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::catalog::{CatalogError, CatalogFuture, IconCatalog};

/// Serves recorded catalog responses from a cassette instead of the network.
pub struct ReplayingIconCatalog {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIconCatalog {
    /// Creates a replaying catalog from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_response(&self) -> Result<String, CatalogError> {
        let interaction = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_interaction("catalog", "fetch")
            .ok_or_else(|| {
                CatalogError::Network("cassette has no more recorded catalog fetches".into())
            })?;

        let output = interaction.output;
        if let Some(err) = output.get("err") {
            let msg = err.as_str().unwrap_or("unknown error").to_string();
            return Err(CatalogError::Network(msg));
        }
        output
            .get("ok")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| CatalogError::Parse("recorded catalog body is not a string".into()))
    }
}

impl IconCatalog for ReplayingIconCatalog {
    fn fetch(&self) -> CatalogFuture<'_> {
        let response = self.next_response();
        Box::pin(async move { response })
    }
}
