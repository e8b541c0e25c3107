//! `weave watch` command.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::watch::WatchController;

/// Execute the `watch` command. Runs until interrupted.
///
/// # Errors
///
/// Returns an error string if the initial combine fails or the template tree
/// cannot be watched.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    super::runtime()?.block_on(WatchController::new(ctx, config).run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, MemFs};
    use std::sync::Arc;

    #[test]
    fn initial_combine_failure_is_fatal() {
        let fs = Arc::new(MemFs::new());
        fs.seed("/p/tmpl/a.ts", "SYNTAX ERROR");
        let ctx = testing::context(fs);

        let err = run(&ctx, &PipelineConfig::new("/p")).unwrap_err();
        assert!(err.starts_with("combine failed:"));
    }
}
