//! The three-step repository sync: stage, commit, push.
//!
//! Each cycle shells out to the `git` CLI three times, strictly in order,
//! with the repository root passed as the child's working directory. Exit
//! codes are recorded but never acted on: a step that fails (for example
//! `git commit` with nothing staged) is indistinguishable from a no-op to
//! the caller, and the remaining steps still run.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Arc;
use tokio::process::Command;

/// Callback type for observing individual step outcomes.
pub type StepCallback = Box<dyn Fn(&StepOutcome) + Send + Sync>;

/// The fixed sync sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Stage,
    Commit,
    Push,
}

impl SyncStep {
    /// All steps in the order a cycle runs them.
    pub const SEQUENCE: [SyncStep; 3] = [SyncStep::Stage, SyncStep::Commit, SyncStep::Push];
}

/// Result of a single external git invocation.
#[derive(Debug)]
pub struct StepOutcome {
    /// Which step this was.
    pub step: SyncStep,
    /// Exit status, or `None` when the process could not be spawned.
    pub status: Option<ExitStatus>,
}

impl StepOutcome {
    /// Whether the step ran and exited zero.
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s.success()).unwrap_or(false)
    }
}

/// Result of one full sync cycle.
#[derive(Debug)]
pub struct SyncReport {
    /// The commit message used for this cycle.
    pub message: String,
    /// One outcome per step, in execution order.
    pub steps: Vec<StepOutcome>,
}

impl SyncReport {
    /// Whether this cycle produced a commit.
    pub fn committed(&self) -> bool {
        self.steps
            .iter()
            .any(|o| o.step == SyncStep::Commit && o.succeeded())
    }
}

/// Renders the commit message for a cycle starting at `now`.
pub fn commit_message(now: DateTime<Local>) -> String {
    format!("Auto commit on {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// Stages, commits, and pushes everything under a repository root.
///
/// The action has no memory between cycles: every invocation runs the same
/// three steps wholesale against the root, whatever changed.
pub struct SyncAction {
    repo_path: PathBuf,
    step_hook: Option<Arc<StepCallback>>,
}

impl SyncAction {
    /// Creates an action for a repository root, with no step hook.
    pub fn new(repo_path: PathBuf) -> Self {
        Self {
            repo_path,
            step_hook: None,
        }
    }

    /// The repository root this action syncs.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Run one sync cycle: `git add .`, `git commit`, `git push`.
    ///
    /// The three invocations are strictly sequential, each running to
    /// completion before the next starts. The children inherit this
    /// process's stdio, so whatever git prints is the only user-visible
    /// reporting. The returned report carries every exit status for
    /// callers that do want to look.
    pub async fn run(&self) -> SyncReport {
        let message = commit_message(Local::now());
        tracing::debug!(repo = %self.repo_path.display(), "starting sync cycle");

        let mut steps = Vec::with_capacity(SyncStep::SEQUENCE.len());
        for step in SyncStep::SEQUENCE {
            let outcome = self.run_step(step, &message).await;
            if let Some(hook) = &self.step_hook {
                hook(&outcome);
            }
            steps.push(outcome);
        }

        SyncReport { message, steps }
    }

    async fn run_step(&self, step: SyncStep, message: &str) -> StepOutcome {
        let mut command = Command::new("git");
        command.current_dir(&self.repo_path);
        match step {
            SyncStep::Stage => {
                command.args(["add", "."]);
            }
            SyncStep::Commit => {
                command.args(["commit", "-m", message]);
            }
            SyncStep::Push => {
                command.arg("push");
            }
        }

        let status = match command.status().await {
            Ok(status) => {
                if !status.success() {
                    tracing::debug!(?step, code = ?status.code(), "sync step exited non-zero");
                }
                Some(status)
            }
            Err(err) => {
                tracing::warn!(?step, "could not spawn git: {}", err);
                None
            }
        };

        StepOutcome { step, status }
    }
}

/// Builder for [`SyncAction`] with an optional step-observation hook.
pub struct SyncActionBuilder {
    repo_path: PathBuf,
    step_hook: Option<StepCallback>,
}

impl SyncActionBuilder {
    /// Starts a builder for the given repository root.
    pub fn new(repo_path: PathBuf) -> Self {
        Self {
            repo_path,
            step_hook: None,
        }
    }

    /// Set a callback invoked with every step outcome.
    ///
    /// Observation only: a failing step reported to the hook still does
    /// not stop the cycle.
    pub fn on_step(mut self, cb: StepCallback) -> Self {
        self.step_hook = Some(cb);
        self
    }

    /// Build the action.
    pub fn build(self) -> SyncAction {
        SyncAction {
            repo_path: self.repo_path,
            step_hook: self.step_hook.map(Arc::new),
        }
    }
}
