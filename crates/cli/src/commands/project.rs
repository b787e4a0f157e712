// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project creation and library listing

use crate::output::{self, OutputFormat};
use anyhow::Result;
use reel_backend::HttpBackend;
use reel_core::ProjectApi;

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Name for the new project
    pub name: String,
}

pub async fn create(backend: HttpBackend, args: CreateArgs) -> Result<()> {
    let id = backend.create_project(&args.name).await?;
    println!("Created project {} ({})", args.name, id);
    println!("Next: reel upload-aroll {} <video>", id);
    Ok(())
}

#[derive(clap::Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn list(backend: HttpBackend, args: ListArgs) -> Result<()> {
    let projects = backend.list_projects().await?;
    output::print_library(&projects, args.format)?;
    Ok(())
}
