//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `weave`.
#[derive(Debug, Parser)]
#[command(name = "weave", version, about = "Build, bundle, watch and audit a template tree")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands. None take arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Recompile the template tree in debug mode.
    Combine,
    /// Recompile in release mode and minify each script into the build folder.
    Build,
    /// Recompile in release mode and write the distribution bundles.
    Dist,
    /// Re-minify the existing distribution bundles in place.
    Cdist,
    /// Delete the build folder.
    CleanBuild,
    /// Delete the compiled-source folder.
    CleanSrc,
    /// Combine, then recompile files as they change.
    Watch,
    /// Report unused, missing and untranslated i18n markers.
    LangCheck,
    /// Report catalog icons no template references.
    IconsCheck,
}
