//! Shared helpers for the behavioral specs

pub use reel_backend::FakeBackend;
pub use reel_core::{
    Action, ActionSet, Availability, EditStep, PipelineStatus, ProjectApi, ProjectId,
    ProjectMetadata, ProjectSession, POLL_INTERVAL,
};
pub use std::time::Duration;

pub fn meta(status: PipelineStatus) -> ProjectMetadata {
    ProjectMetadata {
        status,
        ..ProjectMetadata::idle()
    }
}

pub fn insertion(start: f64, broll_id: &str, duration: f64) -> EditStep {
    EditStep {
        start_in_aroll: start,
        broll_id: broll_id.to_string(),
        reason: format!("matches the narration around {:.0}s", start),
        duration,
    }
}
