// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Busy-flag tracking for in-flight action requests
//!
//! A flag is set synchronously when an action is invoked and records the
//! status that was current at that moment. It is cleared by exactly two
//! events: the request's own failure, or an accepted poll snapshot whose
//! status differs from the recorded one. Never by a timer: the pipeline
//! step's real completion is observable only through polling.

use crate::gate::Action;
use crate::metadata::PipelineStatus;
use std::collections::HashMap;

/// Tracks which actions have a request in flight.
#[derive(Debug, Clone, Default)]
pub struct ActionTracker {
    in_flight: HashMap<Action, PipelineStatus>,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action busy, capturing the status current at invocation.
    ///
    /// Returns false if the action already has a request in flight; the
    /// caller must not issue a second one.
    pub fn begin(&mut self, action: Action, status: PipelineStatus) -> bool {
        if self.in_flight.contains_key(&action) {
            return false;
        }
        self.in_flight.insert(action, status);
        true
    }

    /// The request itself failed: clear immediately, the action is
    /// retryable.
    pub fn fail(&mut self, action: Action) {
        self.in_flight.remove(&action);
    }

    /// An accepted snapshot arrived. Clears every flag whose captured
    /// status differs from the new one (the step visibly took effect)
    /// and returns the cleared actions.
    pub fn reconcile(&mut self, status: PipelineStatus) -> Vec<Action> {
        let cleared: Vec<Action> = self
            .in_flight
            .iter()
            .filter(|(_, captured)| **captured != status)
            .map(|(action, _)| *action)
            .collect();
        for action in &cleared {
            self.in_flight.remove(action);
        }
        cleared
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.in_flight.contains_key(&action)
    }

    /// Drop all flags (project switch or teardown).
    pub fn clear(&mut self) {
        self.in_flight.clear();
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
