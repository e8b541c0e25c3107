//! File-watch port: a stream of change events under a root.

use std::any::Any;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedReceiver;

/// What happened to a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The path was created.
    Created,
    /// The path's contents or metadata changed.
    Modified,
    /// The path was removed or renamed away.
    Removed,
}

/// One change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Path the event refers to.
    pub path: PathBuf,
    /// Kind of change reported by the watch primitive.
    pub kind: ChangeKind,
}

/// Receiving end of a watch subscription.
///
/// Holds whatever keeps the underlying watcher alive; dropping the stream
/// ends the subscription.
pub struct WatchStream {
    receiver: UnboundedReceiver<ChangeEvent>,
    _guard: Option<Box<dyn Any + Send>>,
}

impl WatchStream {
    /// Wraps a receiver together with the handle that feeds it.
    #[must_use]
    pub fn new(receiver: UnboundedReceiver<ChangeEvent>, guard: Box<dyn Any + Send>) -> Self {
        Self { receiver, _guard: Some(guard) }
    }

    /// Wraps a bare receiver; the sender side keeps the stream open.
    #[must_use]
    pub fn from_receiver(receiver: UnboundedReceiver<ChangeEvent>) -> Self {
        Self { receiver, _guard: None }
    }

    /// Waits for the next event. Returns `None` once the source is closed.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        self.receiver.recv().await
    }
}

/// Subscribes to change notifications below a directory.
pub trait FileWatcher: Send + Sync {
    /// Starts watching `root` recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS watch cannot be established.
    fn watch(&self, root: &Path) -> Result<WatchStream, Box<dyn std::error::Error + Send + Sync>>;
}
