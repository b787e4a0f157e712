// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action gating: which pipeline actions are invokable at each status
//!
//! One table, one source of truth. The presentation layer derives every
//! enabled/disabled control from [`ActionSet::derive`] instead of
//! comparing status strings at call sites.

use crate::metadata::{PipelineStatus, ProjectMetadata};

/// User-invokable pipeline actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Run AI analysis over the uploaded B-roll library.
    AnalyzeBroll,
    /// Match analyzed clips against the transcript into an edit plan.
    GeneratePlan,
    /// Render the final video from the edit plan.
    Render,
    /// Fetch the rendered video.
    Download,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::AnalyzeBroll,
        Action::GeneratePlan,
        Action::Render,
        Action::Download,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::AnalyzeBroll => "analyze-broll",
            Action::GeneratePlan => "generate-plan",
            Action::Render => "render",
            Action::Download => "download",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Availability of a single action under the gating table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Legal to invoke now.
    Enabled,
    /// Not legal at the current status.
    Disabled,
    /// Already ran to completion; not reissuable.
    Done,
}

impl Availability {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Availability::Enabled)
    }
}

/// Per-action availability derived from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSet {
    pub analyze_broll: Availability,
    pub generate_plan: Availability,
    pub render: Availability,
    pub download: Availability,
}

impl ActionSet {
    /// Derive availability from a snapshot. Pure; no side effects.
    pub fn derive(metadata: &ProjectMetadata) -> Self {
        use Availability::{Disabled, Done, Enabled};

        match metadata.status {
            PipelineStatus::TranscriptionComplete => Self {
                // analysis needs at least one B-roll clip to work on
                analyze_broll: if metadata.b_roll_count > 0 {
                    Enabled
                } else {
                    Disabled
                },
                generate_plan: Disabled,
                render: Disabled,
                download: Disabled,
            },
            PipelineStatus::BrollAnalyzed => Self {
                analyze_broll: Done,
                generate_plan: Enabled,
                render: Disabled,
                download: Disabled,
            },
            PipelineStatus::PlanReady => Self {
                analyze_broll: Disabled,
                generate_plan: Disabled,
                render: Enabled,
                download: Disabled,
            },
            PipelineStatus::Completed => Self {
                analyze_broll: Disabled,
                generate_plan: Disabled,
                render: Disabled,
                download: Enabled,
            },
            // IDLE, TRANSCRIBING, ANALYZING_BROLL, MATCHING_CLIPS,
            // RENDERING, FAILED: nothing is invokable
            _ => Self::none(),
        }
    }

    /// The all-disabled set.
    pub fn none() -> Self {
        Self {
            analyze_broll: Availability::Disabled,
            generate_plan: Availability::Disabled,
            render: Availability::Disabled,
            download: Availability::Disabled,
        }
    }

    pub fn get(&self, action: Action) -> Availability {
        match action {
            Action::AnalyzeBroll => self.analyze_broll,
            Action::GeneratePlan => self.generate_plan,
            Action::Render => self.render,
            Action::Download => self.download,
        }
    }

    /// Actions currently legal to invoke, in pipeline order.
    pub fn enabled(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|a| self.get(*a).is_enabled())
            .collect()
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
