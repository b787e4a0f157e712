// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline-step commands
//!
//! analyze/plan/render go through the session so the gating table and the
//! busy contract apply; transcribe is not in the gating table and posts
//! directly.

use anyhow::Result;
use reel_backend::HttpBackend;
use reel_core::{Action, ProjectApi, ProjectId, ProjectSession};
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct StepArgs {
    /// Project id
    pub project: String,
}

pub async fn transcribe(backend: HttpBackend, args: StepArgs) -> Result<()> {
    let project = ProjectId::from(args.project);
    backend.transcribe(&project).await?;
    println!("Transcription started");
    println!("Follow it with: reel watch {}", project);
    Ok(())
}

pub async fn analyze(backend: HttpBackend, args: StepArgs) -> Result<()> {
    invoke_step(backend, args, Action::AnalyzeBroll).await?;
    println!("B-roll analysis started");
    Ok(())
}

pub async fn plan(backend: HttpBackend, args: StepArgs) -> Result<()> {
    invoke_step(backend, args, Action::GeneratePlan).await?;
    println!("Edit-plan generation started");
    Ok(())
}

pub async fn render(backend: HttpBackend, args: StepArgs) -> Result<()> {
    invoke_step(backend, args, Action::Render).await?;
    println!("Render started");
    Ok(())
}

/// Fetch the current snapshot, then invoke under the gate.
async fn invoke_step(backend: HttpBackend, args: StepArgs, action: Action) -> Result<()> {
    let mut session = ProjectSession::new(backend);
    session.attach(ProjectId::from(args.project));
    session.refresh().await?;
    session.invoke(action).await?;
    Ok(())
}

#[derive(clap::Args)]
pub struct DownloadArgs {
    /// Project id
    pub project: String,
    /// Where to write the rendered video
    pub out: PathBuf,
}

pub async fn download(backend: HttpBackend, args: DownloadArgs) -> Result<()> {
    let mut session = ProjectSession::new(backend);
    session.attach(ProjectId::from(args.project));
    session.refresh().await?;
    let bytes = session.download(&args.out).await?;
    println!("Saved {} ({} bytes)", args.out.display(), bytes);
    Ok(())
}
