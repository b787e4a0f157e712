// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of the backend pipeline contract

use async_trait::async_trait;
use reel_core::{ApiError, ProjectApi, ProjectId, ProjectListEntry, ProjectMetadata};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection timeout for backend requests. Pipeline steps themselves run
/// asynchronously server-side, so every request here is a quick ack or
/// fetch; uploads and downloads get a longer budget.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Deserialize)]
struct CreatedProject {
    project_id: ProjectId,
}

/// Client for the backend pipeline's HTTP contract.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    transfer_client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(REQUEST_TIMEOUT),
            transfer_client: build_client(TRANSFER_TIMEOUT),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST an ack-only pipeline request.
    async fn post_ack(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = check_status(response).await?;
        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn file_part(path: &Path) -> Result<Part, ApiError> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Part::bytes(data).file_name(file_name))
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to build HTTP client with timeout");
        Client::new()
    })
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Map a non-success response to [`ApiError::Rejected`].
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ProjectApi for HttpBackend {
    async fn create_project(&self, name: &str) -> Result<ProjectId, ApiError> {
        let response = self
            .client
            .post(self.url("create-project"))
            .query(&[("name", name)])
            .send()
            .await
            .map_err(transport)?;
        let created: CreatedProject = Self::json_body(response).await?;
        Ok(created.project_id)
    }

    async fn upload_a_roll(&self, project: &ProjectId, file: &Path) -> Result<(), ApiError> {
        let form = Form::new().part("file", Self::file_part(file).await?);
        let response = self
            .transfer_client
            .post(self.url("a-roll"))
            .query(&[("project_id", project.0.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn upload_b_roll(&self, project: &ProjectId, files: &[PathBuf]) -> Result<(), ApiError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", Self::file_part(file).await?);
        }
        let response = self
            .transfer_client
            .post(self.url("b-roll"))
            .query(&[("project_id", project.0.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn transcribe(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.post_ack(&format!("{}/process", project)).await
    }

    async fn analyze_broll(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.post_ack(&format!("{}/analyze-broll", project)).await
    }

    async fn generate_edit_plan(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.post_ack(&format!("{}/generate-edit-plan", project)).await
    }

    async fn render(&self, project: &ProjectId) -> Result<(), ApiError> {
        self.post_ack(&format!("{}/render", project)).await
    }

    async fn status(&self, project: &ProjectId) -> Result<ProjectMetadata, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("{}/status", project)))
            .send()
            .await
            .map_err(transport)?;
        Self::json_body(response).await
    }

    async fn download(&self, project: &ProjectId, dest: &Path) -> Result<u64, ApiError> {
        let response = self
            .transfer_client
            .get(self.url(&format!("{}/download", project)))
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;
        let body = response.bytes().await.map_err(transport)?;
        tokio::fs::write(dest, &body).await?;
        Ok(body.len() as u64)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectListEntry>, ApiError> {
        let response = self
            .client
            .get(self.url("list-projects"))
            .send()
            .await
            .map_err(transport)?;
        Self::json_body(response).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
