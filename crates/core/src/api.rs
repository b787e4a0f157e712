// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend API trait: the client-side view of the pipeline HTTP contract

use crate::metadata::{EditStep, ProjectId, ProjectMetadata};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One entry in the project library listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListEntry {
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub edit_plan: Option<Vec<EditStep>>,
}

/// Errors from backend operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a usable response (connection refused,
    /// timeout, interrupted body). Retryable.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status.
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not match the contract.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client view of the backend pipeline contract.
///
/// The pipeline-step requests (`transcribe`, `analyze_broll`,
/// `generate_edit_plan`, `render`) are acks: the work runs remotely and
/// its outcome is observed only through `status` polling.
#[async_trait]
pub trait ProjectApi: Clone + Send + Sync + 'static {
    /// Create a project and return its backend-minted id.
    async fn create_project(&self, name: &str) -> Result<ProjectId, ApiError>;

    /// Upload the primary A-roll video.
    async fn upload_a_roll(&self, project: &ProjectId, file: &Path) -> Result<(), ApiError>;

    /// Upload one or more B-roll clips in a single request.
    async fn upload_b_roll(&self, project: &ProjectId, files: &[PathBuf]) -> Result<(), ApiError>;

    /// Start transcription of the uploaded A-roll.
    async fn transcribe(&self, project: &ProjectId) -> Result<(), ApiError>;

    /// Start AI analysis of the B-roll library.
    async fn analyze_broll(&self, project: &ProjectId) -> Result<(), ApiError>;

    /// Start matching clips into an edit plan.
    async fn generate_edit_plan(&self, project: &ProjectId) -> Result<(), ApiError>;

    /// Start rendering the final video.
    async fn render(&self, project: &ProjectId) -> Result<(), ApiError>;

    /// Fetch the current pipeline metadata.
    async fn status(&self, project: &ProjectId) -> Result<ProjectMetadata, ApiError>;

    /// Fetch the rendered video into `dest`. Returns the bytes written.
    async fn download(&self, project: &ProjectId, dest: &Path) -> Result<u64, ApiError>;

    /// List all projects known to the backend, in backend order.
    async fn list_projects(&self) -> Result<Vec<ProjectListEntry>, ApiError>;
}
