//! `weave dist` and `weave cdist` commands.
//!
//! Distribution failures are reported but do not fail the process.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::Orchestrator;

/// Execute the `dist` command.
///
/// # Errors
///
/// Returns an error string only if the async runtime cannot start.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let result = super::runtime()?.block_on(Orchestrator::new(ctx, config).dist());
    report(result);
    Ok(())
}

/// Execute the `cdist` command.
///
/// # Errors
///
/// Never fails; errors are logged.
pub fn run_cdist(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    report(Orchestrator::new(ctx, config).cdist());
    Ok(())
}

fn report(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
}
