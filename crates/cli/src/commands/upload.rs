// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset upload commands

use anyhow::Result;
use reel_backend::HttpBackend;
use reel_core::{ProjectApi, ProjectId};
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct ArollArgs {
    /// Project id
    pub project: String,
    /// Primary video file
    pub file: PathBuf,
}

pub async fn a_roll(backend: HttpBackend, args: ArollArgs) -> Result<()> {
    let project = ProjectId::from(args.project);
    backend.upload_a_roll(&project, &args.file).await?;
    println!("Uploaded A-roll {}", args.file.display());
    println!("Next: reel transcribe {}", project);
    Ok(())
}

#[derive(clap::Args)]
pub struct BrollArgs {
    /// Project id
    pub project: String,
    /// One or more supplementary clips
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub async fn b_roll(backend: HttpBackend, args: BrollArgs) -> Result<()> {
    let project = ProjectId::from(args.project);
    backend.upload_b_roll(&project, &args.files).await?;
    // b_roll_count reflects the upload on the next status fetch
    println!("Uploaded {} B-roll clip(s)", args.files.len());
    Ok(())
}
