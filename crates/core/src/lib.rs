// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reel-core: Core library for the reel pipeline client
//!
//! This crate provides:
//! - The wire data model for backend-reported pipeline metadata
//! - A pipeline state machine holding the single authoritative snapshot
//! - Action gating (what the user may invoke at each status)
//! - A polling controller with generation-token supersession
//! - The backend API trait implemented by reel-backend

pub mod actions;
pub mod api;
pub mod gate;
pub mod machine;
pub mod metadata;
pub mod poller;
pub mod session;


// Re-exports
pub use actions::ActionTracker;
pub use api::{ApiError, ProjectApi, ProjectListEntry};
pub use gate::{Action, ActionSet, Availability};
pub use machine::PipelineStateMachine;
pub use metadata::{EditStep, PipelineStatus, ProjectId, ProjectMetadata};
pub use poller::{PollingController, SnapshotSink, POLL_INTERVAL};
pub use session::{InvokeError, ProjectSession};
