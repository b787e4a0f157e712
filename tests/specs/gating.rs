//! Action-gating specs: one table drives every control

use crate::prelude::*;

const ALL_STATUSES: [PipelineStatus; 10] = [
    PipelineStatus::Idle,
    PipelineStatus::Transcribing,
    PipelineStatus::TranscriptionComplete,
    PipelineStatus::AnalyzingBroll,
    PipelineStatus::BrollAnalyzed,
    PipelineStatus::MatchingClips,
    PipelineStatus::PlanReady,
    PipelineStatus::Rendering,
    PipelineStatus::Completed,
    PipelineStatus::Failed,
];

#[test]
fn render_is_enabled_exactly_at_plan_ready() {
    for status in ALL_STATUSES {
        let set = ActionSet::derive(&ProjectMetadata {
            b_roll_count: 3,
            ..meta(status)
        });
        assert_eq!(
            set.render.is_enabled(),
            status == PipelineStatus::PlanReady,
            "render availability wrong at {status}"
        );
        if status == PipelineStatus::PlanReady {
            assert_eq!(set.analyze_broll, Availability::Disabled);
            assert_eq!(set.generate_plan, Availability::Disabled);
            assert_eq!(set.download, Availability::Disabled);
        }
    }
}

#[test]
fn analysis_needs_a_transcript_and_clips() {
    let without_clips = ActionSet::derive(&ProjectMetadata {
        b_roll_count: 0,
        ..meta(PipelineStatus::TranscriptionComplete)
    });
    assert_eq!(without_clips.analyze_broll, Availability::Disabled);

    let with_clips = ActionSet::derive(&ProjectMetadata {
        b_roll_count: 3,
        ..meta(PipelineStatus::TranscriptionComplete)
    });
    assert_eq!(with_clips.analyze_broll, Availability::Enabled);
}

#[test]
fn completed_analysis_is_not_reissuable() {
    let set = ActionSet::derive(&ProjectMetadata {
        b_roll_count: 3,
        ..meta(PipelineStatus::BrollAnalyzed)
    });
    assert_eq!(set.analyze_broll, Availability::Done);
    assert_eq!(set.generate_plan, Availability::Enabled);
}

#[test]
fn download_waits_for_the_final_render() {
    for status in ALL_STATUSES {
        let set = ActionSet::derive(&meta(status));
        assert_eq!(
            set.download.is_enabled(),
            status == PipelineStatus::Completed,
            "download availability wrong at {status}"
        );
    }
}
