//! Polling cadence, cancellation, and supersession specs

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn start_polls_immediately_then_every_three_seconds() {
    let backend = FakeBackend::new();
    let project = ProjectId::from("PROJ-1");
    backend.script_statuses(&project, [meta(PipelineStatus::Transcribing)]);

    let mut session = ProjectSession::new(backend.clone());
    session.activate(project.clone());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.status_calls(&project), 1);
    assert_eq!(session.snapshot().status, PipelineStatus::Transcribing);

    tokio::time::sleep(POLL_INTERVAL).await;
    assert_eq!(backend.status_calls(&project), 2);

    tokio::time::sleep(POLL_INTERVAL).await;
    assert_eq!(backend.status_calls(&project), 3);
}

#[tokio::test(start_paused = true)]
async fn deactivate_stops_fetching_even_across_pending_ticks() {
    let backend = FakeBackend::new();
    let project = ProjectId::from("PROJ-1");
    backend.script_statuses(&project, [meta(PipelineStatus::Rendering)]);

    let mut session = ProjectSession::new(backend.clone());
    session.activate(project.clone());
    tokio::time::sleep(Duration::from_millis(10)).await;

    session.deactivate();
    tokio::time::sleep(Duration::from_secs(60)).await;

    // no fetch after stop, even across many would-be ticks
    assert_eq!(backend.status_calls(&project), 1);
    assert_eq!(session.snapshot(), ProjectMetadata::idle());
}

#[tokio::test(start_paused = true)]
async fn late_response_for_prior_project_never_mutates_current_snapshot() {
    let backend = FakeBackend::new();
    let project_a = ProjectId::from("PROJ-A");
    let project_b = ProjectId::from("PROJ-B");
    // A's only response is FAILED: if it ever landed on B's snapshot the
    // difference would be stark (and polling would stop)
    backend.script_statuses(&project_a, [meta(PipelineStatus::Failed)]);
    backend.script_statuses(&project_b, [meta(PipelineStatus::Transcribing)]);
    // hold every response in flight for 2 s so A's straddles the switch
    backend.set_status_delay(Duration::from_secs(2));

    let mut session = ProjectSession::new(backend.clone());
    session.activate(project_a.clone());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.status_calls(&project_a), 1);

    session.activate(project_b.clone());
    tokio::time::sleep(Duration::from_secs(5)).await;

    // B's view was never touched by A's late FAILED response
    assert_eq!(session.snapshot().status, PipelineStatus::Transcribing);
    // and polling for B is still alive
    let calls = backend.status_calls(&project_b);
    tokio::time::sleep(POLL_INTERVAL).await;
    assert!(backend.status_calls(&project_b) > calls);
}

#[tokio::test(start_paused = true)]
async fn terminal_status_ends_polling_for_good() {
    let backend = FakeBackend::new();
    let project = ProjectId::from("PROJ-1");
    backend.script_statuses(
        &project,
        [
            meta(PipelineStatus::Rendering),
            meta(PipelineStatus::Completed),
        ],
    );

    let mut session = ProjectSession::new(backend.clone());
    session.activate(project.clone());

    tokio::time::sleep(Duration::from_secs(60)).await;
    // RENDERING, then COMPLETED, then silence
    assert_eq!(backend.status_calls(&project), 2);
    assert_eq!(session.snapshot().status, PipelineStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn transport_failures_keep_the_cadence_without_mutation() {
    let backend = FakeBackend::new();
    let project = ProjectId::from("PROJ-1");
    backend.script_statuses(&project, [meta(PipelineStatus::MatchingClips)]);
    backend.set_status_failing(true);

    let mut session = ProjectSession::new(backend.clone());
    session.activate(project.clone());

    tokio::time::sleep(Duration::from_millis(10)).await;
    tokio::time::sleep(POLL_INTERVAL).await;
    assert_eq!(backend.status_calls(&project), 2);
    // failures never surfaced into the snapshot
    assert_eq!(session.snapshot(), ProjectMetadata::idle());

    backend.set_status_failing(false);
    tokio::time::sleep(POLL_INTERVAL).await;
    assert_eq!(session.snapshot().status, PipelineStatus::MatchingClips);
}
