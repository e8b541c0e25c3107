//! Command dispatch and handlers.

pub mod build;
pub mod clean;
pub mod combine;
pub mod dist;
pub mod icons_check;
pub mod lang_check;
pub mod watch;

use std::env;
use std::path::Path;

use crate::cli::Command;
use crate::config::PipelineConfig;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `WEAVE_REPLAY` is set to a cassette path, the icon catalog is served
/// from that cassette. When `WEAVE_RECORD` is set, the catalog response is
/// recorded to that path.
///
/// # Errors
///
/// Returns an error string if configuration fails or the selected command
/// handler fails.
pub fn dispatch(command: Command) -> Result<(), String> {
    let config = PipelineConfig::from_env()?;
    let ctx = context_for(&config)?;
    dispatch_with_context(command, &ctx, &config)
}

fn context_for(config: &PipelineConfig) -> Result<ServiceContext, String> {
    if let Ok(path) = env::var("WEAVE_REPLAY") {
        return ServiceContext::replaying(config, Path::new(&path));
    }
    if let Ok(path) = env::var("WEAVE_RECORD") {
        eprintln!("Recording catalog responses to: {path}");
        return Ok(ServiceContext::recording(config, Path::new(&path)));
    }
    Ok(ServiceContext::live(config))
}

/// Dispatch a command with the given service context and configuration.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: Command,
    ctx: &ServiceContext,
    config: &PipelineConfig,
) -> Result<(), String> {
    match command {
        Command::Combine => combine::run(ctx, config),
        Command::Build => build::run(ctx, config),
        Command::Dist => dist::run(ctx, config),
        Command::Cdist => dist::run_cdist(ctx, config),
        Command::CleanBuild => clean::run_build(ctx, config),
        Command::CleanSrc => clean::run_src(ctx, config),
        Command::Watch => watch::run(ctx, config),
        Command::LangCheck => lang_check::run(ctx, config),
        Command::IconsCheck => icons_check::run(ctx, config),
    }
}

/// Single-threaded runtime for one command.
fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))
}
