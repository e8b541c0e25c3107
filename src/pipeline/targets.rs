//! The fixed build targets and distribution bundles.

use std::fmt;

use crate::pipeline::glob::Selection;

/// A named build operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
    /// Development compile with progress output.
    Combine,
    /// Release compile, minified file by file.
    Build,
    /// Release compile, concatenated into the named bundles.
    Dist,
    /// Re-minification of existing bundles in place.
    Cdist,
}

impl BuildTarget {
    /// Debug flag used for the composer run.
    #[must_use]
    pub fn debug(self) -> bool {
        matches!(self, Self::Combine)
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Combine => "combine",
            Self::Build => "build",
            Self::Dist => "dist",
            Self::Cdist => "cdist",
        };
        f.write_str(name)
    }
}

/// A distribution bundle: the compiled files it concatenates, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle {
    /// Output file name under the distribution folder.
    pub name: &'static str,
    /// Include globs, relative to the compiled folder.
    pub include: &'static [&'static str],
    /// Exclude globs, applied to every include.
    pub exclude: &'static [&'static str],
}

impl Bundle {
    /// Compiles the bundle's globs.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob fails to compile.
    pub fn selection(&self) -> Result<Selection, String> {
        Selection::new(self.include, self.exclude)
    }
}

/// Main application bundle. Printer entry points are left out.
pub const IOT_BUNDLE: Bundle = Bundle {
    name: "iot.js",
    include: &[
        "iot.js",
        "gallery/**",
        "i18n/**",
        "util/**",
        "panels/**",
        "elements/**",
        "designer/**",
    ],
    exclude: &["elements/**/printer.js"],
};

/// Print-only bundle, without the editor subsystem.
pub const PRINTER_BUNDLE: Bundle = Bundle {
    name: "printer.js",
    include: &[
        "printer.js",
        "i18n/**",
        "designer/service.js",
        "designer/transform.js",
        "elements/**",
        "gallery/mx-dialog/**",
        "printer/**",
    ],
    exclude: &[
        "elements/designer.js",
        "elements/**/designer.js",
        "elements/**/dshow.js",
        "elements/svg.js",
        "elements/flow.js",
        "elements/hod.js",
        "elements/hollow.js",
        "elements/normal.js",
        "elements/index.js",
    ],
};

/// Bundles written by `dist`, in write order.
pub const BUNDLES: &[Bundle] = &[IOT_BUNDLE, PRINTER_BUNDLE];
