//! Binary entrypoint for the `weave` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Catalog record/replay is handled in commands::dispatch via WEAVE_RECORD / WEAVE_REPLAY.
    match weave::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
