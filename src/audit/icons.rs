//! Icon usage audit: glyph codes referenced locally versus the remote catalog.

use std::collections::BTreeSet;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::audit::catalog::{load_catalog, CatalogFetch, CatalogIcon};
use crate::config::PipelineConfig;
use crate::context::ServiceContext;

/// Extensions scanned for glyph codes.
const ICON_EXTENSIONS: &[&str] = &["css", "less", "html", "js", "ts", "mx"];

lazy_static! {
    /// Quoted hex escape in a style sheet: `'\e6a1'` or `"\e6a1"`.
    static ref CSS_ICON: Regex = Regex::new(r#"'\\([0-9a-fA-F]{4})'|"\\([0-9a-fA-F]{4})""#)
        .expect("valid css icon pattern");
    /// HTML numeric character reference: `&#xe6a1`.
    static ref HTML_ICON: Regex =
        Regex::new(r"&#x([0-9a-fA-F]{4})").expect("valid html icon pattern");
}

/// Findings of one `icons-check` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IconReport {
    /// Distinct codes referenced in the template tree, unpadded hex.
    pub local: BTreeSet<String>,
    /// Catalog entries not referenced locally, in catalog order.
    pub unused: Vec<CatalogIcon>,
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Glyph codes referenced in one file's content, as unpadded lowercase hex
/// so they compare equal to codes derived from catalog codepoints.
#[must_use]
pub fn extract_codes(ext: &str, content: &str) -> Vec<String> {
    let pattern: &Regex = match ext {
        "css" | "less" => &*CSS_ICON,
        _ => &*HTML_ICON,
    };
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter_map(|m| u32::from_str_radix(m.as_str(), 16).ok())
        .map(|cp| format!("{cp:x}"))
        .collect()
}

/// Collects every glyph code referenced under the template tree.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a file cannot be read.
pub fn scan_local_usage(
    ctx: &ServiceContext,
    config: &PipelineConfig,
) -> Result<BTreeSet<String>, String> {
    let template_dir = config.template_dir();
    let files = ctx
        .fs
        .walk(&template_dir)
        .map_err(|e| format!("failed to walk {}: {e}", template_dir.display()))?;

    let mut codes = BTreeSet::new();
    for file in files {
        let Some(ext) = extension(&file).filter(|e| ICON_EXTENSIONS.contains(e)) else {
            continue;
        };
        let content = ctx
            .fs
            .read_lossy(&file)
            .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
        codes.extend(extract_codes(ext, &content));
    }
    Ok(codes)
}

/// Catalog entries whose code is absent locally, deduplicated by code.
#[must_use]
pub fn unused_codes(catalog: &[CatalogIcon], local: &BTreeSet<String>) -> Vec<CatalogIcon> {
    let mut seen = BTreeSet::new();
    catalog
        .iter()
        .filter(|icon| !local.contains(&icon.code))
        .filter(|icon| seen.insert(icon.code.clone()))
        .cloned()
        .collect()
}

/// Runs the usage audit.
///
/// An empty catalog yields an empty report with a notice.
///
/// # Errors
///
/// Returns an error if the local scan fails or the catalog cannot be fetched
/// or parsed.
pub async fn audit(ctx: &ServiceContext, config: &PipelineConfig) -> Result<IconReport, String> {
    let local = scan_local_usage(ctx, config)?;
    match load_catalog(ctx.catalog.as_ref()).await {
        CatalogFetch::Loaded(icons) => {
            let unused = unused_codes(&icons, &local);
            Ok(IconReport { local, unused })
        }
        CatalogFetch::Empty => {
            println!("Icon catalog is empty; nothing to compare.");
            Ok(IconReport { local, unused: Vec::new() })
        }
        CatalogFetch::Failed(e) => Err(format!("failed to load icon catalog: {e}")),
    }
}
