//! End-to-end test: a live watcher over a real repository with a real
//! upstream. Creating a file must produce a timestamped auto commit and
//! push it, leaving the local head equal to the remote-tracking head.

use git_autosync::{prelude::*, run_sync_loop};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

fn git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo)
        .args(args)
        .output()
        .expect("git not available");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Best-effort read; sync cycles hold the index lock now and then.
fn try_git(repo: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .current_dir(repo)
        .args(args)
        .output()
        .ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

/// A working clone with a bare upstream it can push to.
fn seeded_clone(root: &Path) -> PathBuf {
    let upstream = root.join("upstream.git");
    std::fs::create_dir(&upstream).unwrap();
    git(&upstream, &["init", "--bare"]);

    let work = root.join("work");
    std::fs::create_dir(&work).unwrap();
    git(&work, &["init"]);
    git(&work, &["config", "user.name", "tester"]);
    git(&work, &["config", "user.email", "tester@example.com"]);
    std::fs::write(work.join("README"), b"seed\n").unwrap();
    git(&work, &["add", "."]);
    git(&work, &["commit", "-m", "seed"]);
    git(&work, &["remote", "add", "origin", upstream.to_str().unwrap()]);
    git(&work, &["push", "-u", "origin", "HEAD"]);

    work
}

#[tokio::test(flavor = "multi_thread")]
async fn change_is_committed_and_pushed() {
    let dir = tempfile::tempdir().unwrap();
    let work = seeded_clone(dir.path());

    let (mut watcher, events) = RepoWatcher::new().unwrap();
    watcher.watch(&work).unwrap();

    let action_repo = work.clone();
    let loop_handle = tokio::spawn(async move {
        let action = SyncActionBuilder::new(action_repo).build();
        run_sync_loop(events, &action).await;
    });

    std::fs::write(work.join("a.txt"), b"hello\n").unwrap();

    let deadline = Instant::now() + Duration::from_secs(20);
    let mut synced = false;
    while Instant::now() < deadline {
        let subject = try_git(&work, &["log", "-1", "--format=%s"]);
        let local = try_git(&work, &["rev-parse", "HEAD"]);
        let upstream = try_git(&work, &["rev-parse", "@{u}"]);
        if let (Some(subject), Some(local), Some(upstream)) = (subject, local, upstream) {
            if subject.starts_with("Auto commit on ") && local == upstream {
                synced = true;
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    loop_handle.abort();
    watcher.unwatch(&work).unwrap();

    assert!(synced, "no auto commit reached the upstream in time");
}
