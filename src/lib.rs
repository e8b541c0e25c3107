//! Core library entry for the `weave` CLI.

pub mod adapters;
pub mod audit;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod normalize;
pub mod pipeline;
pub mod ports;
pub mod watch;

#[cfg(test)]
mod testing;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["weave", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_without_subcommand() {
        let result = run(["weave"]);
        assert!(result.is_err());
    }
}
