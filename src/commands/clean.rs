//! `weave clean-build` and `weave clean-src` commands.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::Orchestrator;

/// Execute the `clean-build` command.
///
/// # Errors
///
/// Returns an error string if an existing build folder cannot be deleted.
pub fn run_build(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    Orchestrator::new(ctx, config).clean_build()?;
    println!("Deleted {}", config.build_folder);
    Ok(())
}

/// Execute the `clean-src` command.
///
/// # Errors
///
/// Returns an error string if an existing compiled-source folder cannot be
/// deleted.
pub fn run_src(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    Orchestrator::new(ctx, config).clean_src()?;
    println!("Deleted {}", config.compiled_folder);
    Ok(())
}
