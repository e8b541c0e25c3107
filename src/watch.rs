//! Watch mode.
//!
//! After an initial full combine, every change under the template tree either
//! recompiles the one file (when it still exists) or removes its compiled
//! counterpart. Events are handled independently and recompilations for
//! different paths may overlap. A failed recompilation is logged and the
//! loop keeps running.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;

use crate::audit::display_relative;
use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::Orchestrator;
use crate::ports::clock::Clock;
use crate::ports::composer::ComposeOptions;
use crate::ports::watcher::{ChangeEvent, WatchStream};

/// Whether composer work is outstanding for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// Nothing in flight.
    Idle,
    /// A recompilation or removal has been requested and not yet finished.
    Processing,
}

type InFlight = Arc<Mutex<HashMap<PathBuf, usize>>>;

/// Drives the composer from file-change events.
pub struct WatchController<'a> {
    ctx: &'a ServiceContext,
    config: &'a PipelineConfig,
    options: Arc<ComposeOptions>,
    in_flight: InFlight,
}

impl<'a> WatchController<'a> {
    /// Creates a controller compiling in debug mode.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a PipelineConfig) -> Self {
        let debug = config.with_debug(true);
        let options = Orchestrator::new(ctx, config).compose_options(&debug);
        Self { ctx, config, options: Arc::new(options), in_flight: Arc::default() }
    }

    /// Current state of `path`.
    #[must_use]
    pub fn state(&self, path: &Path) -> PathState {
        let in_flight = self.in_flight.lock().expect("in-flight lock poisoned");
        if in_flight.contains_key(path) {
            PathState::Processing
        } else {
            PathState::Idle
        }
    }

    /// Runs the initial combine, then serves change events until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial combine fails or the watch cannot be
    /// established. Later failures are only logged.
    pub async fn run(&self) -> Result<(), String> {
        Orchestrator::new(self.ctx, self.config).combine().await?;

        let template_dir = self.config.template_dir();
        let stream = self
            .ctx
            .watcher
            .watch(&template_dir)
            .map_err(|e| format!("failed to watch {}: {e}", template_dir.display()))?;
        log(self.ctx.clock.as_ref(), &format!("watching {}", self.shown(&template_dir)));

        self.serve(stream, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await;
        Ok(())
    }

    /// Handles events from `stream` until it closes or `shutdown` resolves,
    /// then waits for outstanding recompilations.
    pub async fn serve<F>(&self, mut stream: WatchStream, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();
        loop {
            tokio::select! {
                event = stream.next() => match event {
                    Some(event) => self.handle(event, &mut tasks),
                    None => break,
                },
                () = &mut shutdown => {
                    log(self.ctx.clock.as_ref(), "stopping");
                    break;
                }
            }
            while let Some(done) = tasks.try_join_next() {
                report_join(done);
            }
        }
        while let Some(done) = tasks.join_next().await {
            report_join(done);
        }
    }

    fn handle(&self, event: ChangeEvent, tasks: &mut JoinSet<()>) {
        let path = event.path;
        let shown = self.shown(&path);
        begin(&self.in_flight, &path);

        if self.ctx.fs.exists(&path) {
            let composer = Arc::clone(&self.ctx.composer);
            let options = Arc::clone(&self.options);
            let clock = Arc::clone(&self.ctx.clock);
            let in_flight = Arc::clone(&self.in_flight);
            tasks.spawn(async move {
                match composer.recompile_file(&options, &path).await {
                    Ok(()) => log(clock.as_ref(), &format!("compiled {shown}")),
                    Err(e) => warn(clock.as_ref(), &format!("failed to compile {shown}: {e}")),
                }
                finish(&in_flight, &path);
            });
        } else {
            let clock = self.ctx.clock.as_ref();
            match self.ctx.composer.remove_compiled_output(&self.options, &path) {
                Ok(()) => log(clock, &format!("removed {shown}")),
                Err(e) => warn(clock, &format!("failed to remove output of {shown}: {e}")),
            }
            finish(&self.in_flight, &path);
        }
    }

    fn shown(&self, path: &Path) -> String {
        display_relative(path, &self.config.root)
    }
}

fn begin(in_flight: &InFlight, path: &Path) {
    let mut in_flight = in_flight.lock().expect("in-flight lock poisoned");
    *in_flight.entry(path.to_path_buf()).or_insert(0) += 1;
}

fn finish(in_flight: &InFlight, path: &Path) {
    let mut in_flight = in_flight.lock().expect("in-flight lock poisoned");
    if let Some(count) = in_flight.get_mut(path) {
        *count -= 1;
        if *count == 0 {
            in_flight.remove(path);
        }
    }
}

fn report_join(done: Result<(), tokio::task::JoinError>) {
    if let Err(e) = done {
        eprintln!("recompile task aborted: {e}");
    }
}

fn log(clock: &dyn Clock, message: &str) {
    println!("{} {message}", clock.now().format("%H:%M:%S"));
}

fn warn(clock: &dyn Clock, message: &str) {
    eprintln!("{} {message}", clock.now().format("%H:%M:%S"));
}
