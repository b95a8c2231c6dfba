//! Filesystem watch subscription.
//!
//! This module provides:
//! - `watcher`: the recursive notify-backed subscription that turns raw
//!   notifications into [`ChangeEvent`]s, one per working-tree mutation

pub mod watcher;

pub use watcher::{ChangeEvent, ChangeKind, RepoWatcher, WatcherError};
