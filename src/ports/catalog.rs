//! Icon catalog port: the remote reference set of assigned glyph codes.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future type alias used by [`IconCatalog`] to keep the trait dyn-compatible.
pub type CatalogFuture<'a> = Pin<Box<dyn Future<Output = Result<String, CatalogError>> + Send + 'a>>;

/// Failure fetching or decoding the remote catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No response within the configured timeout.
    #[error("icon catalog request timed out after {0}s")]
    Timeout(u64),
    /// Connection or transport failure.
    #[error("icon catalog request failed: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("icon catalog responded with HTTP {0}")]
    Status(u16),
    /// The body was not the expected JSON document.
    #[error("icon catalog document is malformed: {0}")]
    Parse(String),
}

/// Fetches the raw catalog document.
pub trait IconCatalog: Send + Sync {
    /// Performs a single fetch of the catalog body.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on timeout, transport failure, or a
    /// non-success status.
    fn fetch(&self) -> CatalogFuture<'_>;
}
