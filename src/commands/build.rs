//! `weave build` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::Orchestrator;

/// Execute the `build` command.
///
/// # Errors
///
/// Returns an error string if cleaning, compilation or minification fails.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    super::runtime()?.block_on(Orchestrator::new(ctx, config).build())
}
