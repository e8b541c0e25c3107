//! Transpiler port: source-language to JavaScript translation.

/// Options for a single transpile call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    /// ECMAScript target version, e.g. `es2018`.
    pub target: String,
}

/// Translates one module's source text.
pub trait Transpiler: Send + Sync {
    /// Transpiles `source` and returns the output text.
    ///
    /// # Errors
    ///
    /// Returns an error if the external transpiler fails or rejects the input.
    fn transpile(
        &self,
        source: &str,
        options: &TranspileOptions,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
