// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling controller for the active project's status endpoint
//!
//! Fetches status at a fixed cadence and feeds accepted responses to an
//! injected sink. Every `start` bumps a generation token; a response may
//! only be applied while the token captured at its fetch still matches
//! the controller's current one, so responses belonging to a superseded
//! project switch land inert. The token comparison is exact under the
//! cooperative single-threaded runtime this crate targets: between the
//! comparison and `apply` there is no await point.

use crate::api::ProjectApi;
use crate::metadata::{ProjectId, ProjectMetadata};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Fixed polling cadence. No backoff on error, no retry cap.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Receives accepted poll responses.
pub trait SnapshotSink: Send + Sync + 'static {
    /// Apply an accepted snapshot. Returns true when it left the pipeline
    /// in a terminal status, which tells the controller to stop on its
    /// own.
    fn apply(&self, project: &ProjectId, metadata: ProjectMetadata) -> bool;
}

/// Polls `GET /{project_id}/status` for the active project.
pub struct PollingController<A: ProjectApi> {
    api: A,
    sink: Arc<dyn SnapshotSink>,
    interval: Duration,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<A: ProjectApi> PollingController<A> {
    pub fn new(api: A, sink: Arc<dyn SnapshotSink>) -> Self {
        Self {
            api,
            sink,
            interval: POLL_INTERVAL,
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Override the cadence (tests).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Begin polling `project`: one immediate fetch, then one per
    /// interval until `stop` or a terminal status.
    ///
    /// Supersedes any previous `start`: outstanding requests for prior
    /// generations resolve inert. The superseded loop is not aborted at
    /// the transport level; it exits on its own the moment it observes
    /// the stale token, before issuing any further request.
    pub fn start(&mut self, project: ProjectId) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Detach the previous loop rather than aborting it; its token is
        // stale now, so it can only exit.
        self.task.take();

        let api = self.api.clone();
        let sink = Arc::clone(&self.sink);
        let generation = Arc::clone(&self.generation);
        let interval = self.interval;

        tracing::debug!(project = %project, token, "polling started");
        self.task = Some(tokio::spawn(poll_loop(
            api, sink, project, token, generation, interval,
        )));
    }

    /// Halt the timer and invalidate the token. Idempotent; callable
    /// when not started.
    pub fn stop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<A: ProjectApi> Drop for PollingController<A> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<A: ProjectApi>(
    api: A,
    sink: Arc<dyn SnapshotSink>,
    project: ProjectId,
    token: u64,
    generation: Arc<AtomicU64>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    // A fetch slower than the cadence must skip ticks, not burst
    // catch-up requests.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if generation.load(Ordering::SeqCst) != token {
            // Superseded while waiting; issue no further requests.
            return;
        }

        match api.status(&project).await {
            Ok(metadata) => {
                if generation.load(Ordering::SeqCst) != token {
                    // Superseded while the fetch was in flight. Not a
                    // failure: the response is simply inert.
                    tracing::debug!(project = %project, token, "dropping superseded status response");
                    return;
                }
                if sink.apply(&project, metadata) {
                    // Absorbing status: invalidate the token and stop.
                    generation.fetch_add(1, Ordering::SeqCst);
                    tracing::debug!(project = %project, "terminal status reached, polling stopped");
                    return;
                }
            }
            Err(e) => {
                if generation.load(Ordering::SeqCst) != token {
                    return;
                }
                // Transient: state untouched, retried on the next tick.
                tracing::debug!(project = %project, error = %e, "status poll failed, retrying on next tick");
            }
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
