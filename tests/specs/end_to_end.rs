//! End-to-end scenario: a project from creation to downloaded render

use crate::prelude::*;
use std::path::{Path, PathBuf};

#[tokio::test]
async fn full_pipeline_walkthrough() {
    let backend = FakeBackend::new();

    // create project "demo": the session starts from the empty snapshot
    let project = backend.create_project("demo").await.unwrap();
    let mut session = ProjectSession::new(backend.clone());
    session.attach(project.clone());
    assert_eq!(session.snapshot(), ProjectMetadata::idle());
    assert!(session.actions().enabled().is_empty());

    // upload the a-roll; the backend transcribes it
    backend
        .upload_a_roll(&project, Path::new("talking-head.mp4"))
        .await
        .unwrap();
    backend.script_statuses(
        &project,
        [ProjectMetadata {
            a_roll_duration: 12.4,
            ..meta(PipelineStatus::TranscriptionComplete)
        }],
    );
    let snapshot = session.refresh().await.unwrap();
    assert_eq!(snapshot.a_roll_duration, 12.4);
    // no clips uploaded yet: analysis stays locked
    assert_eq!(session.actions().analyze_broll, Availability::Disabled);

    // three b-roll uploads show up in the next poll
    let clips: Vec<PathBuf> = ["city.mp4", "office.mp4", "coffee.mp4"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    backend.upload_b_roll(&project, &clips).await.unwrap();
    backend.script_statuses(
        &project,
        [ProjectMetadata {
            a_roll_duration: 12.4,
            b_roll_count: 3,
            ..meta(PipelineStatus::TranscriptionComplete)
        }],
    );
    session.refresh().await.unwrap();
    assert_eq!(session.snapshot().b_roll_count, 3);
    assert_eq!(session.actions().analyze_broll, Availability::Enabled);

    // analyze: busy until the poll shows the stage has been picked up
    session.invoke(Action::AnalyzeBroll).await.unwrap();
    assert!(session.is_busy(Action::AnalyzeBroll));
    backend.script_statuses(
        &project,
        [
            ProjectMetadata {
                status_message: Some("analyzing clip 1/3".to_string()),
                ..meta(PipelineStatus::AnalyzingBroll)
            },
            meta(PipelineStatus::BrollAnalyzed),
        ],
    );
    let snapshot = session.refresh().await.unwrap();
    assert_eq!(snapshot.status, PipelineStatus::AnalyzingBroll);
    assert!(!session.is_busy(Action::AnalyzeBroll));

    session.refresh().await.unwrap();
    assert_eq!(session.snapshot().status, PipelineStatus::BrollAnalyzed);
    assert_eq!(session.actions().analyze_broll, Availability::Done);
    assert_eq!(session.actions().generate_plan, Availability::Enabled);

    // generate the edit plan
    session.invoke(Action::GeneratePlan).await.unwrap();
    backend.script_statuses(
        &project,
        [
            meta(PipelineStatus::MatchingClips),
            ProjectMetadata {
                edit_plan: Some(vec![
                    insertion(2.0, "city.mp4", 1.5),
                    insertion(7.5, "office.mp4", 2.0),
                ]),
                ..meta(PipelineStatus::PlanReady)
            },
        ],
    );
    session.refresh().await.unwrap();
    assert_eq!(session.snapshot().status, PipelineStatus::MatchingClips);
    session.refresh().await.unwrap();

    let snapshot = session.snapshot();
    let plan = snapshot.plan().expect("plan must be present at PLAN_READY");
    assert_eq!(plan.len(), 2);
    // timeline order preserved
    assert!(plan[0].start_in_aroll < plan[1].start_in_aroll);
    assert_eq!(session.actions().render, Availability::Enabled);
    assert_eq!(session.actions().download, Availability::Disabled);

    // render to completion
    session.invoke(Action::Render).await.unwrap();
    assert!(session.is_busy(Action::Render));
    backend.script_statuses(
        &project,
        [
            meta(PipelineStatus::Rendering),
            ProjectMetadata {
                edit_plan: Some(vec![
                    insertion(2.0, "city.mp4", 1.5),
                    insertion(7.5, "office.mp4", 2.0),
                ]),
                ..meta(PipelineStatus::Completed)
            },
        ],
    );
    session.refresh().await.unwrap();
    assert_eq!(session.snapshot().status, PipelineStatus::Rendering);
    session.refresh().await.unwrap();

    // download unlocks only now
    assert_eq!(session.actions().download, Availability::Enabled);
    assert!(session.actions().enabled() == vec![Action::Download]);

    backend.set_video(b"master cut".to_vec());
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("demo.mp4");
    let written = session.download(&dest).await.unwrap();
    assert_eq!(written, 10);
    assert_eq!(std::fs::read(&dest).unwrap(), b"master cut");
}

#[tokio::test]
async fn failed_pipeline_is_terminal_with_advisory_message() {
    let backend = FakeBackend::new();
    let project = backend.create_project("doomed").await.unwrap();
    let mut session = ProjectSession::new(backend.clone());
    session.attach(project.clone());

    backend.script_statuses(
        &project,
        [ProjectMetadata {
            status_message: Some("renderer crashed".to_string()),
            ..meta(PipelineStatus::Failed)
        }],
    );
    let snapshot = session.refresh().await.unwrap();

    assert!(snapshot.status.is_terminal());
    // advisory only: surfaced, never parsed
    assert_eq!(snapshot.status_message.as_deref(), Some("renderer crashed"));
    // nothing is invokable on a failed project
    assert!(session.actions().enabled().is_empty());
}
