//! Watches the current directory and commits and pushes every change.
//!
//! No flags and no configuration: the watch root is the directory the
//! process is started in, and the push target is whatever upstream the
//! repository already has. Ctrl+C stops the watch loop; an in-flight sync
//! cycle is allowed to finish first.

use anyhow::Result;
use git_autosync::prelude::*;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("git_autosync=info".parse()?),
        )
        .init();

    let repo_root = PathBuf::from("./");

    let (mut watcher, mut events) = RepoWatcher::new()?;
    watcher.watch(&repo_root)?;

    let action = SyncActionBuilder::new(repo_root.clone()).build();

    tracing::info!(root = %repo_root.display(), "watching repository for changes");

    // Handle Ctrl+C gracefully
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    loop {
        tokio::select! {
            // Shutdown is checked first so a pending interrupt wins over
            // further queued events.
            biased;

            _ = shutdown_rx.recv() => {
                tracing::info!("interrupt received, shutting down");
                break;
            }
            maybe_event = events.recv() => match maybe_event {
                Some(event) => {
                    tracing::debug!(kind = ?event.kind, path = %event.path.display(), "change detected");
                    // Runs to completion; the shutdown channel is not
                    // looked at again until the cycle is done.
                    action.run().await;
                }
                None => break,
            }
        }
    }

    if let Err(err) = watcher.unwatch(&repo_root) {
        tracing::warn!("failed to release watch subscription: {}", err);
    }

    Ok(())
}
