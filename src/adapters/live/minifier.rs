//! Live minifier adapter driving the `terser` CLI.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::ports::minifier::{Minifier, MinifyOptions};
use crate::ports::shell::ShellExecutor;

const DEFAULT_PROGRAM: &str = "npx --no-install terser";

/// Minifies by piping source through `terser`.
pub struct LiveMinifier {
    shell: Arc<dyn ShellExecutor>,
    program: String,
}

impl LiveMinifier {
    /// Creates a minifier; `program` replaces the default `npx terser` invocation.
    #[must_use]
    pub fn new(shell: Arc<dyn ShellExecutor>, program: Option<String>) -> Self {
        Self { shell, program: program.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()) }
    }
}

/// Renders the CLI flags for a set of minify options.
fn flags(options: &MinifyOptions) -> String {
    let mut compress = Vec::new();
    if options.drop_console {
        compress.push("drop_console=true");
    }
    if options.drop_debugger {
        compress.push("drop_debugger=true");
    }

    let mut out = String::from("--mangle");
    if compress.is_empty() {
        out.push_str(" --compress");
    } else {
        let _ = write!(out, " --compress {}", compress.join(","));
    }
    for (name, value) in &options.global_defs {
        let _ = write!(out, " --define {name}={value}");
    }
    if options.ascii_only {
        out.push_str(" --format ascii_only=true");
    }
    out
}

impl Minifier for LiveMinifier {
    fn minify(
        &self,
        source: &str,
        options: &MinifyOptions,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let command = format!("{} {}", self.program, flags(options));
        let output = self.shell.run_with_input(&command, source)?;
        if !output.success() {
            return Err(format!(
                "minifier exited with status {}: {}",
                output.exit_code,
                output.stderr.trim()
            )
            .into());
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_flags_strip_and_fold() {
        let rendered = flags(&MinifyOptions::release());
        assert_eq!(
            rendered,
            "--mangle --compress drop_console=true,drop_debugger=true --define DEBUG=false"
        );
    }

    #[test]
    fn ascii_only_adds_format_flag() {
        let rendered = flags(&MinifyOptions::release().with_ascii_only());
        assert!(rendered.ends_with("--format ascii_only=true"));
    }

    #[test]
    fn plain_options_still_compress() {
        let options = MinifyOptions {
            drop_console: false,
            drop_debugger: false,
            global_defs: Vec::new(),
            ascii_only: false,
        };
        assert_eq!(flags(&options), "--mangle --compress");
    }

    #[test]
    fn runs_configured_program() {
        let minifier = LiveMinifier::new(
            Arc::new(crate::adapters::live::shell::LiveShellExecutor),
            Some("sh -c 'cat' --".to_string()),
        );
        // `sh -c 'cat' --` ignores the flags appended after `--`.
        let out = minifier.minify("var a = 1;", &MinifyOptions::release()).unwrap();
        assert_eq!(out, "var a = 1;");
    }
}
