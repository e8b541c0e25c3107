//! Static audits over the template tree.
//!
//! Both audits are lexical scans; findings are reported as data and never
//! abort the scan.

pub mod catalog;
pub mod i18n;
pub mod icons;
pub mod report;

use std::path::Path;

/// Renders `path` relative to `root` with forward slashes, falling back to
/// the full path when it lies elsewhere.
#[must_use]
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_relative_strips_root() {
        assert_eq!(
            display_relative(Path::new("/p/tmpl/views/a.html"), Path::new("/p")),
            "tmpl/views/a.html"
        );
        assert_eq!(display_relative(Path::new("/q/a.html"), Path::new("/p")), "/q/a.html");
    }
}
