//! Live adapter for the `IconCatalog` port: one HTTPS GET with a timeout.

use std::time::Duration;

use reqwest::Client;

use crate::ports::catalog::{CatalogError, CatalogFuture, IconCatalog};

/// Fetches the catalog document over HTTP.
pub struct LiveIconCatalog {
    client: Client,
    url: String,
    timeout: Duration,
}

impl LiveIconCatalog {
    /// Creates a catalog client for `url` that gives up after `timeout`.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { client: Client::new(), url: url.into(), timeout }
    }

    fn classify(&self, err: &reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.timeout.as_secs())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl IconCatalog for LiveIconCatalog {
    fn fetch(&self) -> CatalogFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| self.classify(&e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }
            response.text().await.map_err(|e| self.classify(&e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let catalog = LiveIconCatalog::new("http://127.0.0.1:9/icons.json", Duration::from_secs(2));
        let err = catalog.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_) | CatalogError::Timeout(_)));
    }
}
