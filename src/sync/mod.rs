//! The stage → commit → push sync action.
//!
//! This module provides:
//! - `action`: the fixed three-step git invocation sequence and its
//!   per-step outcome reporting

pub mod action;

pub use action::{
    commit_message, StepCallback, StepOutcome, SyncAction, SyncActionBuilder, SyncReport, SyncStep,
};
