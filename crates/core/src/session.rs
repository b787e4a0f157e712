// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-project session: the single owner of client-side state
//!
//! Exactly one project is active at a time. The session owns the state
//! machine and the busy-flag tracker, wires them to the polling
//! controller through the snapshot-sink seam, and publishes every
//! accepted snapshot on a watch channel for the presentation layer.
//! Switching projects resets to the empty `IDLE` snapshot and clears all
//! busy flags, so the cancellation contract lives in one auditable place.

use crate::actions::ActionTracker;
use crate::api::{ApiError, ProjectApi};
use crate::gate::{Action, ActionSet};
use crate::machine::PipelineStateMachine;
use crate::metadata::{PipelineStatus, ProjectId, ProjectMetadata};
use crate::poller::{PollingController, SnapshotSink};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

/// Errors from the action-invocation contract.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("no active project")]
    NoActiveProject,

    #[error("{action} is not available while status is {status}")]
    NotAvailable {
        action: Action,
        status: PipelineStatus,
    },

    #[error("{action} already has a request in flight")]
    AlreadyInFlight { action: Action },

    #[error("{action} is fulfilled by a direct transfer, not a pipeline request")]
    NotAPipelineStep { action: Action },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Default)]
struct SessionState {
    project: Option<ProjectId>,
    machine: PipelineStateMachine,
    tracker: ActionTracker,
}

struct SharedInner {
    state: Mutex<SessionState>,
    updates: watch::Sender<ProjectMetadata>,
}

/// Shared interior of the session; implements the poller's sink.
#[derive(Clone)]
struct SharedState {
    inner: Arc<SharedInner>,
}

impl SharedState {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, metadata: ProjectMetadata) {
        self.inner.updates.send_replace(metadata);
    }
}

impl SnapshotSink for SharedState {
    fn apply(&self, project: &ProjectId, metadata: ProjectMetadata) -> bool {
        let mut state = self.lock();
        if state.project.as_ref() != Some(project) {
            // A superseded project's response must never mutate the
            // current snapshot. Returning true retires the zombie loop.
            tracing::debug!(project = %project, "ignoring snapshot for inactive project");
            return true;
        }

        let status = metadata.status;
        let previous = state.machine.apply(metadata.clone());
        if status.progression() < previous.progression() {
            // Accepted anyway: the backend is the ordering authority.
            tracing::warn!(project = %project, from = %previous, to = %status, "backend regressed status");
        }

        let cleared = state.tracker.reconcile(status);
        if !cleared.is_empty() {
            tracing::debug!(project = %project, actions = ?cleared, "busy flags cleared by status change");
        }
        drop(state);

        self.publish(metadata);
        status.is_terminal()
    }
}

/// Owns the client-side view of the single active project.
pub struct ProjectSession<A: ProjectApi> {
    api: A,
    shared: SharedState,
    controller: PollingController<A>,
}

impl<A: ProjectApi> ProjectSession<A> {
    pub fn new(api: A) -> Self {
        Self::with_poll_interval(api, crate::poller::POLL_INTERVAL)
    }

    /// Build a session whose controller polls at a custom cadence.
    pub fn with_poll_interval(api: A, interval: Duration) -> Self {
        let (updates, _) = watch::channel(ProjectMetadata::idle());
        let shared = SharedState {
            inner: Arc::new(SharedInner {
                state: Mutex::new(SessionState::default()),
                updates,
            }),
        };
        let controller =
            PollingController::new(api.clone(), Arc::new(shared.clone())).with_interval(interval);
        Self {
            api,
            shared,
            controller,
        }
    }

    /// Make `project` active without polling (one-shot use: `refresh`
    /// then `invoke`).
    pub fn attach(&mut self, project: ProjectId) {
        self.controller.stop();
        let mut state = self.shared.lock();
        state.project = Some(project);
        state.machine.reset();
        state.tracker.clear();
        drop(state);
        self.shared.publish(ProjectMetadata::idle());
    }

    /// Make `project` active and begin polling it: one immediate fetch,
    /// then the fixed cadence until `deactivate` or a terminal status.
    pub fn activate(&mut self, project: ProjectId) {
        self.attach(project.clone());
        self.controller.start(project);
    }

    /// Stop polling and drop per-project state.
    pub fn deactivate(&mut self) {
        self.controller.stop();
        let mut state = self.shared.lock();
        state.project = None;
        state.machine.reset();
        state.tracker.clear();
        drop(state);
        self.shared.publish(ProjectMetadata::idle());
    }

    /// The active project, if any.
    pub fn project(&self) -> Option<ProjectId> {
        self.shared.lock().project.clone()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> ProjectMetadata {
        self.shared.lock().machine.current().clone()
    }

    /// Gate table derived from the current snapshot.
    pub fn actions(&self) -> ActionSet {
        ActionSet::derive(self.shared.lock().machine.current())
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.shared.lock().tracker.is_busy(action)
    }

    /// Subscribe to accepted snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ProjectMetadata> {
        self.shared.inner.updates.subscribe()
    }

    /// Fetch status once and apply it, without starting the poller.
    pub async fn refresh(&self) -> Result<ProjectMetadata, InvokeError> {
        let project = self.active_project()?;
        let metadata = self.api.status(&project).await?;
        self.shared.apply(&project, metadata.clone());
        Ok(metadata)
    }

    /// Invoke a pipeline-step action under the gate + busy contract.
    ///
    /// The busy flag is set synchronously, before the request suspends;
    /// it clears on the request's own failure or on the next accepted
    /// snapshot whose status differs from the one captured here.
    pub async fn invoke(&self, action: Action) -> Result<(), InvokeError> {
        let project = self.begin_request(action)?;

        if let Err(e) = self.send_request(action, &project).await {
            // The request itself failed: revert the flag, retryable.
            self.shared.lock().tracker.fail(action);
            return Err(InvokeError::Api(e));
        }
        Ok(())
    }

    /// Fetch the rendered video into `dest`. Gated on `COMPLETED`; a
    /// direct transfer, so it carries no busy flag: its own response is
    /// its completion.
    pub async fn download(&self, dest: &Path) -> Result<u64, InvokeError> {
        let project = {
            let state = self.shared.lock();
            let project = state
                .project
                .clone()
                .ok_or(InvokeError::NoActiveProject)?;
            let snapshot = state.machine.current();
            if !ActionSet::derive(snapshot).download.is_enabled() {
                return Err(InvokeError::NotAvailable {
                    action: Action::Download,
                    status: snapshot.status,
                });
            }
            project
        };
        Ok(self.api.download(&project, dest).await?)
    }

    fn active_project(&self) -> Result<ProjectId, InvokeError> {
        self.shared
            .lock()
            .project
            .clone()
            .ok_or(InvokeError::NoActiveProject)
    }

    /// Gate-check an action and set its busy flag, all under one lock.
    fn begin_request(&self, action: Action) -> Result<ProjectId, InvokeError> {
        if action == Action::Download {
            return Err(InvokeError::NotAPipelineStep { action });
        }

        let mut state = self.shared.lock();
        let project = state
            .project
            .clone()
            .ok_or(InvokeError::NoActiveProject)?;
        let snapshot = state.machine.current();
        let status = snapshot.status;
        if !ActionSet::derive(snapshot).get(action).is_enabled() {
            return Err(InvokeError::NotAvailable { action, status });
        }
        if !state.tracker.begin(action, status) {
            return Err(InvokeError::AlreadyInFlight { action });
        }
        tracing::debug!(project = %project, action = %action, status = %status, "pipeline step requested");
        Ok(project)
    }

    async fn send_request(&self, action: Action, project: &ProjectId) -> Result<(), ApiError> {
        match action {
            Action::AnalyzeBroll => self.api.analyze_broll(project).await,
            Action::GeneratePlan => self.api.generate_edit_plan(project).await,
            Action::Render => self.api.render(project).await,
            // begin_request refuses Download before any flag is set
            Action::Download => Err(ApiError::Rejected {
                status: 400,
                message: "download is not a pipeline step".to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
