// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted fake backend for testing

use async_trait::async_trait;
use reel_core::{ApiError, ProjectApi, ProjectId, ProjectListEntry, ProjectMetadata};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Recorded call to the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateProject { name: String },
    UploadARoll { project: ProjectId, file: PathBuf },
    UploadBRoll { project: ProjectId, files: Vec<PathBuf> },
    Transcribe { project: ProjectId },
    AnalyzeBroll { project: ProjectId },
    GenerateEditPlan { project: ProjectId },
    Render { project: ProjectId },
    Status { project: ProjectId },
    Download { project: ProjectId, dest: PathBuf },
    ListProjects,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<BackendCall>,
    statuses: HashMap<ProjectId, VecDeque<ProjectMetadata>>,
    projects: Vec<ProjectListEntry>,
    video: Vec<u8>,
    next_project: u32,
    status_delay: Option<Duration>,
    // Configurable failure modes
    status_fails: bool,
    actions_fail: bool,
}

/// Fake backend with per-project scripted status sequences.
///
/// Every call is recorded. Scripted statuses are served in order; the
/// final entry repeats once the script runs dry, so a poller settling on
/// one status keeps seeing it.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append one status response to a project's script.
    pub fn push_status(&self, project: &ProjectId, metadata: ProjectMetadata) {
        self.lock()
            .statuses
            .entry(project.clone())
            .or_default()
            .push_back(metadata);
    }

    /// Replace a project's status script.
    pub fn script_statuses(
        &self,
        project: &ProjectId,
        responses: impl IntoIterator<Item = ProjectMetadata>,
    ) {
        self.lock()
            .statuses
            .insert(project.clone(), responses.into_iter().collect());
    }

    /// Delay every status response; with a paused test clock this holds a
    /// response in flight across a project switch.
    pub fn set_status_delay(&self, delay: Duration) {
        self.lock().status_delay = Some(delay);
    }

    pub fn set_status_failing(&self, fail: bool) {
        self.lock().status_fails = fail;
    }

    /// Make pipeline-step requests fail with a transport error.
    pub fn set_actions_failing(&self, fail: bool) {
        self.lock().actions_fail = fail;
    }

    /// Seed the library listing.
    pub fn add_project(&self, entry: ProjectListEntry) {
        self.lock().projects.push(entry);
    }

    /// Bytes served by the download endpoint.
    pub fn set_video(&self, bytes: impl Into<Vec<u8>>) {
        self.lock().video = bytes.into();
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Number of status fetches issued for `project`.
    pub fn status_calls(&self, project: &ProjectId) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, BackendCall::Status { project: p } if p == project))
            .count()
    }

    fn record(&self, call: BackendCall) {
        self.lock().calls.push(call);
    }

    fn action_result(&self) -> Result<(), ApiError> {
        if self.lock().actions_fail {
            Err(ApiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProjectApi for FakeBackend {
    async fn create_project(&self, name: &str) -> Result<ProjectId, ApiError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::CreateProject {
            name: name.to_string(),
        });
        state.next_project += 1;
        let id = ProjectId(format!("PROJ-{}", state.next_project));
        state.projects.push(ProjectListEntry {
            project_id: id.clone(),
            name: name.to_string(),
            edit_plan: None,
        });
        Ok(id)
    }

    async fn upload_a_roll(&self, project: &ProjectId, file: &Path) -> Result<(), ApiError> {
        self.record(BackendCall::UploadARoll {
            project: project.clone(),
            file: file.to_path_buf(),
        });
        self.action_result()
    }

    async fn upload_b_roll(&self, project: &ProjectId, files: &[PathBuf]) -> Result<(), ApiError> {
        self.record(BackendCall::UploadBRoll {
            project: project.clone(),
            files: files.to_vec(),
        });
        self.action_result()
    }

    async fn transcribe(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.record(BackendCall::Transcribe {
            project: project.clone(),
        });
        self.action_result()
    }

    async fn analyze_broll(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.record(BackendCall::AnalyzeBroll {
            project: project.clone(),
        });
        self.action_result()
    }

    async fn generate_edit_plan(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.record(BackendCall::GenerateEditPlan {
            project: project.clone(),
        });
        self.action_result()
    }

    async fn render(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.record(BackendCall::Render {
            project: project.clone(),
        });
        self.action_result()
    }

    async fn status(&self, project: &ProjectId) -> Result<ProjectMetadata, ApiError> {
        // Record at issue time; the response may land much later.
        let delay = {
            let mut state = self.lock();
            state.calls.push(BackendCall::Status {
                project: project.clone(),
            });
            state.status_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        if state.status_fails {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        let queue = state.statuses.entry(project.clone()).or_default();
        let metadata = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        Ok(metadata.unwrap_or_default())
    }

    async fn download(&self, project: &ProjectId, dest: &Path) -> Result<u64, ApiError> {
        let video = {
            let mut state = self.lock();
            state.calls.push(BackendCall::Download {
                project: project.clone(),
                dest: dest.to_path_buf(),
            });
            state.video.clone()
        };
        tokio::fs::write(dest, &video).await?;
        Ok(video.len() as u64)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectListEntry>, ApiError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::ListProjects);
        Ok(state.projects.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
