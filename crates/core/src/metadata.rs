// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire data model for backend-reported pipeline metadata

use serde::{Deserialize, Serialize};

/// Opaque identifier for a project, stable for its lifetime.
///
/// Minted by the backend on project creation; scopes every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        ProjectId(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        ProjectId(s.to_string())
    }
}

/// Pipeline status as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStatus {
    /// Nothing processed yet. Deployed backends also report the
    /// pre-contract `DRAFT` and `A_ROLL_UPLOADED` statuses for this
    /// stage; both precede transcription and gate identically.
    #[serde(alias = "DRAFT", alias = "A_ROLL_UPLOADED")]
    Idle,
    Transcribing,
    TranscriptionComplete,
    AnalyzingBroll,
    BrollAnalyzed,
    MatchingClips,
    PlanReady,
    Rendering,
    Completed,
    Failed,
}

impl PipelineStatus {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStatus::Idle => "IDLE",
            PipelineStatus::Transcribing => "TRANSCRIBING",
            PipelineStatus::TranscriptionComplete => "TRANSCRIPTION_COMPLETE",
            PipelineStatus::AnalyzingBroll => "ANALYZING_BROLL",
            PipelineStatus::BrollAnalyzed => "BROLL_ANALYZED",
            PipelineStatus::MatchingClips => "MATCHING_CLIPS",
            PipelineStatus::PlanReady => "PLAN_READY",
            PipelineStatus::Rendering => "RENDERING",
            PipelineStatus::Completed => "COMPLETED",
            PipelineStatus::Failed => "FAILED",
        }
    }

    /// Check if this status is absorbing: once reached, no further
    /// polling is issued for the project.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStatus::Completed | PipelineStatus::Failed)
    }

    /// Check if a backend stage is currently running for this status.
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            PipelineStatus::Transcribing
                | PipelineStatus::AnalyzingBroll
                | PipelineStatus::MatchingClips
                | PipelineStatus::Rendering
        )
    }

    /// Position in the nominal forward progression. Used only to detect
    /// a backend that regressed; `Failed` can be entered from any stage
    /// so it shares the final slot.
    pub(crate) fn progression(&self) -> u8 {
        match self {
            PipelineStatus::Idle => 0,
            PipelineStatus::Transcribing => 1,
            PipelineStatus::TranscriptionComplete => 2,
            PipelineStatus::AnalyzingBroll => 3,
            PipelineStatus::BrollAnalyzed => 4,
            PipelineStatus::MatchingClips => 5,
            PipelineStatus::PlanReady => 6,
            PipelineStatus::Rendering => 7,
            PipelineStatus::Completed | PipelineStatus::Failed => 8,
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry in the ordered edit plan (timeline order is meaningful).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditStep {
    /// Insertion point in the A-roll, in seconds.
    pub start_in_aroll: f64,
    /// Which B-roll clip to insert.
    pub broll_id: String,
    /// Why the matcher chose this clip.
    pub reason: String,
    /// Insertion length, in seconds.
    pub duration: f64,
}

/// Pipeline metadata reported by `GET /{project_id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub status: PipelineStatus,
    /// Duration of the uploaded A-roll in seconds; 0 until probed.
    #[serde(default)]
    pub a_roll_duration: f64,
    /// Number of B-roll clips stored for the project.
    #[serde(default)]
    pub b_roll_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_plan: Option<Vec<EditStep>>,
    /// Advisory progress text; free-form, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl ProjectMetadata {
    /// The empty snapshot a project starts from when it becomes active.
    pub fn idle() -> Self {
        Self {
            status: PipelineStatus::Idle,
            a_roll_duration: 0.0,
            b_roll_count: 0,
            edit_plan: None,
            status_message: None,
        }
    }

    /// The edit plan, only once the pipeline has actually produced one.
    ///
    /// Before `PLAN_READY` the field is not meaningful and is treated as
    /// absent regardless of what the backend sent.
    pub fn plan(&self) -> Option<&[EditStep]> {
        match self.status {
            PipelineStatus::PlanReady
            | PipelineStatus::Rendering
            | PipelineStatus::Completed => self.edit_plan.as_deref(),
            _ => None,
        }
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
