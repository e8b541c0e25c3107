//! `weave combine` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::Orchestrator;

/// Execute the `combine` command.
///
/// # Errors
///
/// Returns an error string if cleaning or compilation fails; the binary then
/// exits non-zero.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    super::runtime()?.block_on(Orchestrator::new(ctx, config).combine())
}
