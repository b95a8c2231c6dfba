//! Recursive filesystem watch subscription.
//!
//! Wraps a `notify` watcher and forwards every mutation event (create,
//! modify, remove, rename) under the watched root into a channel, one
//! [`ChangeEvent`] per raw event. Access events and other non-mutating
//! notifications are dropped here, so downstream consumers only ever see
//! events that can change the working tree.

use notify::{
    event::ModifyKind, Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Errors that can occur in the watch subscription.
#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("failed to create watcher: {0}")]
    Creation(#[from] notify::Error),

    #[error("failed to watch path {}: {source}", .path.display())]
    WatchPath {
        path: PathBuf,
        source: notify::Error,
    },

    #[error("watch root {} does not exist or is not a directory", .0.display())]
    RootMissing(PathBuf),
}

/// The four event kinds that trigger a sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Modify,
    Remove,
    Rename,
}

impl ChangeKind {
    /// Map a raw notify event kind onto a trigger kind.
    ///
    /// Returns `None` for access events and unclassified notifications;
    /// those do not represent working-tree mutations and must not start a
    /// sync cycle.
    pub fn from_event_kind(kind: EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(ChangeKind::Create),
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
            EventKind::Modify(_) => Some(ChangeKind::Modify),
            EventKind::Remove(_) => Some(ChangeKind::Remove),
            _ => None,
        }
    }
}

/// A single filesystem change under the watch root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// First path the OS reported for the raw event.
    pub path: PathBuf,
    /// What happened to it.
    pub kind: ChangeKind,
}

impl ChangeEvent {
    fn from_notify(event: Event) -> Option<Self> {
        let kind = ChangeKind::from_event_kind(event.kind)?;
        let path = event.paths.into_iter().next()?;
        Some(Self { path, kind })
    }
}

/// A live recursive watch subscription over a repository root.
///
/// Events arrive on the receiver returned by [`RepoWatcher::new`] in OS
/// delivery order. The channel is unbounded: this layer never drops an
/// event, though the OS notification mechanism may coalesce rapid
/// duplicates on its own.
pub struct RepoWatcher {
    watcher: RecommendedWatcher,
}

impl RepoWatcher {
    /// Creates a new watcher and the channel its events arrive on.
    pub fn new() -> Result<(Self, UnboundedReceiver<ChangeEvent>), WatcherError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher = Self::spawn_backend(tx)?;

        Ok((Self { watcher }, rx))
    }

    fn spawn_backend(tx: UnboundedSender<ChangeEvent>) -> Result<RecommendedWatcher, WatcherError> {
        let config = Config::default().with_compare_contents(false);

        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!("watch backend error: {}", err);
                        return;
                    }
                };

                if let Some(change) = ChangeEvent::from_notify(event) {
                    // A closed receiver means we are shutting down.
                    let _ = tx.send(change);
                }
            },
            config,
        )?;

        Ok(watcher)
    }

    /// Start watching a root directory recursively.
    ///
    /// The root must already exist; a missing root is a startup error, not
    /// something to wait out.
    pub fn watch(&mut self, root: &Path) -> Result<(), WatcherError> {
        if !root.is_dir() {
            return Err(WatcherError::RootMissing(root.to_path_buf()));
        }

        self.watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| WatcherError::WatchPath {
                path: root.to_path_buf(),
                source: e,
            })
    }

    /// Release the subscription for a root.
    pub fn unwatch(&mut self, root: &Path) -> Result<(), WatcherError> {
        self.watcher
            .unwatch(root)
            .map_err(|e| WatcherError::WatchPath {
                path: root.to_path_buf(),
                source: e,
            })
    }
}
