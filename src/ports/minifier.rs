//! Minifier port: JavaScript compression.

/// Compression and output settings for one minify call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Remove `console.*` calls.
    pub drop_console: bool,
    /// Remove `debugger` statements.
    pub drop_debugger: bool,
    /// Compile-time constants folded during compression, as `(name, literal)`.
    pub global_defs: Vec<(String, String)>,
    /// Escape every non-ASCII character in the emitted text.
    pub ascii_only: bool,
}

impl MinifyOptions {
    /// Release settings shared by every target: console and debugger
    /// stripped, `DEBUG` folded to `false`.
    #[must_use]
    pub fn release() -> Self {
        Self {
            drop_console: true,
            drop_debugger: true,
            global_defs: vec![("DEBUG".to_string(), "false".to_string())],
            ascii_only: false,
        }
    }

    /// Returns these settings with ASCII-only output enabled.
    #[must_use]
    pub fn with_ascii_only(mut self) -> Self {
        self.ascii_only = true;
        self
    }
}

/// Compresses JavaScript text.
pub trait Minifier: Send + Sync {
    /// Minifies `source` with the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the external minifier fails or rejects the input.
    fn minify(
        &self,
        source: &str,
        options: &MinifyOptions,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
