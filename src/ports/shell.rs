//! Shell executor port for running external tools.

/// The output of a shell command execution.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes shell commands.
///
/// The transpiler and minifier adapters drive external tools through this
/// port, so tests can substitute canned outputs.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command string with `input` piped to its standard input.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, its stdin cannot be
    /// written, or it fails to execute.
    fn run_with_input(
        &self,
        command: &str,
        input: &str,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}
