//! Live transpiler adapter: pipes source through the TypeScript compiler API.

use std::sync::Arc;

use crate::ports::shell::ShellExecutor;
use crate::ports::transpiler::{TranspileOptions, Transpiler};

/// Transpiles through an external command that reads stdin and writes stdout.
pub struct LiveTranspiler {
    shell: Arc<dyn ShellExecutor>,
    command: Option<String>,
}

impl LiveTranspiler {
    /// Creates a transpiler; `command` overrides the default `node` one-liner.
    #[must_use]
    pub fn new(shell: Arc<dyn ShellExecutor>, command: Option<String>) -> Self {
        Self { shell, command }
    }

    fn command_for(&self, options: &TranspileOptions) -> String {
        self.command.clone().unwrap_or_else(|| default_command(options))
    }
}

/// `node -e` script calling `ts.transpileModule` on stdin. No module system
/// is requested; the composer wraps each module itself.
fn default_command(options: &TranspileOptions) -> String {
    format!(
        "node -e \"const ts=require('typescript');let s='';process.stdin.on('data',d=>s+=d)\
         .on('end',()=>process.stdout.write(ts.transpileModule(s,{{compilerOptions:\
         {{target:'{target}',module:ts.ModuleKind.None}}}}).outputText))\"",
        target = options.target,
    )
}

impl Transpiler for LiveTranspiler {
    fn transpile(
        &self,
        source: &str,
        options: &TranspileOptions,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = self.shell.run_with_input(&self.command_for(options), source)?;
        if !output.success() {
            return Err(format!(
                "transpiler exited with status {}: {}",
                output.exit_code,
                output.stderr.trim()
            )
            .into());
        }
        Ok(output.stdout)
    }
}
