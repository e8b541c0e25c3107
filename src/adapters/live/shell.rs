//! Live shell executor using `std::process::Command`.

use std::io::{ErrorKind, Write};
use std::process::{Command, Output, Stdio};

use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Live shell executor that runs commands via the system shell.
pub struct LiveShellExecutor;

fn to_shell_output(output: &Output) -> ShellOutput {
    ShellOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

impl ShellExecutor for LiveShellExecutor {
    fn run_with_input(
        &self,
        command: &str,
        input: &str,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from a separate thread so a chatty child cannot block on
        // a full stdout pipe while we are still writing.
        let mut stdin = child.stdin.take().ok_or("child stdin was not captured")?;
        let payload = input.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(payload.as_bytes()));

        let output = child.wait_with_output()?;
        // A child that exits without reading its input closes the pipe early.
        match writer.join().map_err(|_| "stdin writer thread panicked")? {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
            _ => {}
        }
        Ok(to_shell_output(&output))
    }
}
