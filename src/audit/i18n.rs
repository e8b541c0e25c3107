//! i18n coverage audit.
//!
//! Compares the markers declared in the canonical locale file against the
//! markers referenced across the template tree, and collects CJK literals
//! that were never externalized.

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::audit::display_relative;
use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::ports::composer::StringProcessor;

lazy_static! {
    /// Localization marker, `@:{lang#<key>}`.
    static ref LANG_MARKER: Regex =
        Regex::new(r"@:\{lang#[\s\S]+?\}").expect("valid lang marker pattern");
    /// Contiguous run of CJK unified ideographs.
    static ref CJK_RUN: Regex =
        Regex::new(r"[\x{4e00}-\x{9fa5}]+").expect("valid CJK pattern");
}

/// Directories whose content is never audited.
const SKIPPED_DIRS: &[&str] = &["lib", "i18n"];

/// Findings of one `lang-check` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LangReport {
    /// Declared in the locale file but never referenced.
    pub unused: Vec<String>,
    /// Referenced in the template tree but never declared.
    pub missed: Vec<String>,
    /// Untranslated literal mapped to the last file it was seen in.
    pub needs_i18n: BTreeMap<String, String>,
}

/// Usage counters for the declared markers.
#[derive(Debug, Default)]
pub struct MarkerUsage {
    declared: Vec<String>,
    counts: HashMap<String, usize>,
    missed: Vec<String>,
}

impl MarkerUsage {
    /// Seeds a counter at zero for every distinct marker in `locale`.
    #[must_use]
    pub fn seed(locale: &str) -> Self {
        let mut usage = Self::default();
        for m in LANG_MARKER.find_iter(locale) {
            let marker = m.as_str();
            if !usage.counts.contains_key(marker) {
                usage.declared.push(marker.to_string());
                usage.counts.insert(marker.to_string(), 0);
            }
        }
        usage
    }

    /// Counts every marker in `content`; undeclared ones are recorded as missed.
    pub fn record(&mut self, content: &str) {
        for m in LANG_MARKER.find_iter(content) {
            let marker = m.as_str();
            if let Some(count) = self.counts.get_mut(marker) {
                *count += 1;
            } else if !self.missed.iter().any(|seen| seen == marker) {
                self.missed.push(marker.to_string());
            }
        }
    }

    /// Declared markers still at zero, in declaration order.
    #[must_use]
    pub fn unused(&self) -> Vec<String> {
        self.declared.iter().filter(|m| self.counts[m.as_str()] == 0).cloned().collect()
    }

    /// Undeclared markers, in first-seen order.
    #[must_use]
    pub fn missed(&self) -> &[String] {
        &self.missed
    }
}

/// Every run of CJK ideographs in `content`.
pub fn untranslated(content: &str) -> impl Iterator<Item = &str> {
    CJK_RUN.find_iter(content).map(|m| m.as_str())
}

/// Whether a template-relative path lies under a `lib` or `i18n` directory.
fn is_skipped(rel: &Path) -> bool {
    rel.parent().is_some_and(|dir| {
        dir.components().any(|c| match c {
            Component::Normal(name) => SKIPPED_DIRS.iter().any(|skip| name == *skip),
            _ => false,
        })
    })
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

/// Runs the coverage audit over the template tree.
///
/// # Errors
///
/// Returns an error if the locale file or a template file cannot be read, or
/// if the composer's string pass fails.
pub async fn audit(ctx: &ServiceContext, config: &PipelineConfig) -> Result<LangReport, String> {
    let locale_path = config.locale_path();
    let locale = ctx
        .fs
        .read_to_string(&locale_path)
        .map_err(|e| format!("failed to read locale file {}: {e}", locale_path.display()))?;
    let mut usage = MarkerUsage::seed(&locale);

    let template_dir = config.template_dir();
    let files = ctx
        .fs
        .walk(&template_dir)
        .map_err(|e| format!("failed to walk {}: {e}", template_dir.display()))?;

    let needs_i18n = Arc::new(Mutex::new(BTreeMap::new()));
    for file in files {
        let rel = file.strip_prefix(&template_dir).unwrap_or(&file);
        if is_skipped(rel) {
            continue;
        }
        let content = ctx
            .fs
            .read_lossy(&file)
            .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
        usage.record(&content);
        if is_html(&file) {
            let shown = display_relative(&file, &config.root);
            let mut found = needs_i18n.lock().expect("needs-i18n lock poisoned");
            for text in untranslated(&content) {
                found.insert(text.to_string(), shown.clone());
            }
        }
    }

    let sink = Arc::clone(&needs_i18n);
    let root = config.root.clone();
    let scan_root = template_dir.clone();
    let processor: StringProcessor = Arc::new(move |content: &str, from: &Path| {
        let rel = from.strip_prefix(&scan_root).unwrap_or(from);
        if is_skipped(rel) {
            return;
        }
        let shown = display_relative(from, &root);
        let mut found = sink.lock().expect("needs-i18n lock poisoned");
        for text in untranslated(content) {
            found.insert(text.to_string(), shown.clone());
        }
    });
    let options = config.compose_options();
    ctx.composer
        .process_all_strings(&options, processor)
        .await
        .map_err(|e| format!("failed to process template strings: {e}"))?;

    let needs_i18n = needs_i18n.lock().expect("needs-i18n lock poisoned").clone();
    Ok(LangReport { unused: usage.unused(), missed: usage.missed().to_vec(), needs_i18n })
}
