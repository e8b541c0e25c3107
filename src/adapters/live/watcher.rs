//! Live file watcher backed by `notify`.

use std::path::Path;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::ports::watcher::{ChangeEvent, ChangeKind, FileWatcher, WatchStream};

/// Recursive OS-level watcher forwarding events into a tokio channel.
pub struct LiveFileWatcher;

impl FileWatcher for LiveFileWatcher {
    fn watch(&self, root: &Path) -> Result<WatchStream, Box<dyn std::error::Error + Send + Sync>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for change in translate(&event) {
                    // Receiver gone means the watch loop ended.
                    let _ = tx.send(change);
                }
            }
            Err(e) => eprintln!("watch error: {e}"),
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        Ok(WatchStream::new(rx, Box::new(watcher)))
    }
}

/// Maps a `notify` event to per-path change events.
///
/// Access events are dropped, as are events for directories that still
/// exist: only files have compiled counterparts.
fn translate(event: &Event) -> Vec<ChangeEvent> {
    let kind = match event.kind {
        EventKind::Create(_) => ChangeKind::Created,
        EventKind::Modify(_) => ChangeKind::Modified,
        EventKind::Remove(_) => ChangeKind::Removed,
        _ => return Vec::new(),
    };
    event
        .paths
        .iter()
        .filter(|path| !path.is_dir())
        .map(|path| ChangeEvent { path: path.clone(), kind })
        .collect()
}
