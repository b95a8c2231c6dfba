//! Automatic commit-and-push for a watched repository tree.
//!
//! Every filesystem change under the repository root (create, modify,
//! remove, rename) triggers one sync cycle: `git add .`, `git commit` with
//! a timestamped message, `git push`. Cycles run strictly one at a time in
//! event order. Step failures are recorded but never stop a cycle, so an
//! event on a tree with nothing new to commit just runs three harmless
//! no-ops.
//!
//! ```text
//! Filesystem change
//!        ↓
//! RepoWatcher (notify, recursive)
//!        ↓
//! ChangeEvent channel
//!        ↓
//! run_sync_loop (one cycle per event)
//!        ↓
//! SyncAction: git add . / git commit / git push
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use git_autosync::{prelude::*, run_sync_loop};
//! use std::path::{Path, PathBuf};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (mut watcher, events) = RepoWatcher::new()?;
//!     watcher.watch(Path::new("/path/to/repo"))?;
//!
//!     let action = SyncActionBuilder::new(PathBuf::from("/path/to/repo")).build();
//!     run_sync_loop(events, &action).await;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`watch`]: recursive filesystem watch subscription
//!   - [`watch::watcher`]: notify-backed watcher and change events
//! - [`sync`]: the fixed three-step git sync
//!   - [`sync::action`]: stage, commit, push with per-step outcomes

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod sync;
pub mod watch;

/// Re-exports for convenience.
pub mod prelude {
    pub use crate::sync::{
        commit_message, StepCallback, StepOutcome, SyncAction, SyncActionBuilder, SyncReport,
        SyncStep,
    };
    pub use crate::watch::{ChangeEvent, ChangeKind, RepoWatcher, WatcherError};
}

/// Run the sync loop until the event channel closes.
///
/// One sync cycle per received event, in delivery order. Each cycle runs
/// to completion before the next event is taken, so a burst of events
/// queues up behind the current cycle rather than overlapping it.
pub async fn run_sync_loop(
    mut events: tokio::sync::mpsc::UnboundedReceiver<watch::ChangeEvent>,
    action: &sync::SyncAction,
) {
    while let Some(event) = events.recv().await {
        tracing::debug!(kind = ?event.kind, path = %event.path.display(), "change detected");
        action.run().await;
    }
}
