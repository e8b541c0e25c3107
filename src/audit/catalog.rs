//! Remote icon catalog parsing.
//!
//! The catalog document has the shape
//! `{"data": {"icons": [{"unicode": "59000", "name": "..."}, ...]}}`, where
//! `unicode` is a decimal codepoint given as a number or a string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ports::catalog::{CatalogError, IconCatalog};

/// One catalog entry with its derived hex code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogIcon {
    /// Display name, when the catalog provides one.
    pub name: Option<String>,
    /// Lowercase hex code derived from the decimal codepoint.
    pub code: String,
}

/// Typed outcome of one catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogFetch {
    /// The catalog listed at least one icon.
    Loaded(Vec<CatalogIcon>),
    /// The catalog was reachable but lists no icons.
    Empty,
    /// The request or the document failed.
    Failed(CatalogError),
}

#[derive(Deserialize)]
struct CatalogDocument {
    data: CatalogData,
}

#[derive(Deserialize)]
struct CatalogData {
    icons: Vec<RawIcon>,
}

#[derive(Deserialize)]
struct RawIcon {
    #[serde(default)]
    unicode: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    font_class: Option<String>,
}

/// Parses a catalog document into icons, in catalog order.
///
/// Entries without a usable codepoint are skipped with a warning.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the body is not a catalog document.
pub fn parse_catalog(body: &str) -> Result<Vec<CatalogIcon>, CatalogError> {
    let document: CatalogDocument =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let mut icons = Vec::with_capacity(document.data.icons.len());
    for raw in document.data.icons {
        match codepoint(&raw.unicode) {
            Some(cp) => icons.push(CatalogIcon {
                name: raw.name.or(raw.font_class),
                code: format!("{cp:x}"),
            }),
            None => eprintln!("Warning: skipping catalog icon with unicode {}", raw.unicode),
        }
    }
    Ok(icons)
}

/// Decimal codepoint from a JSON number, or from the leading digits of a string.
fn codepoint(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Fetches and parses the catalog, folding every failure into the result.
pub async fn load_catalog(catalog: &dyn IconCatalog) -> CatalogFetch {
    let body = match catalog.fetch().await {
        Ok(body) => body,
        Err(e) => return CatalogFetch::Failed(e),
    };
    match parse_catalog(&body) {
        Ok(icons) if icons.is_empty() => CatalogFetch::Empty,
        Ok(icons) => CatalogFetch::Loaded(icons),
        Err(e) => CatalogFetch::Failed(e),
    }
}
