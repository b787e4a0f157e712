// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot status and live watch commands

use crate::output::{self, OutputFormat};
use anyhow::Result;
use reel_backend::HttpBackend;
use reel_core::{
    Action, ActionSet, PipelineStatus, ProjectApi, ProjectId, ProjectSession,
};

#[derive(clap::Args)]
pub struct StatusArgs {
    /// Project id
    pub project: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn status(backend: HttpBackend, args: StatusArgs) -> Result<()> {
    let metadata = backend.status(&ProjectId::from(args.project)).await?;
    output::print_status(&metadata, args.format)?;
    Ok(())
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Project id
    pub project: String,
}

pub async fn watch(backend: HttpBackend, args: WatchArgs) -> Result<()> {
    let project = ProjectId::from(args.project);
    let mut session = ProjectSession::new(backend);
    let mut updates = session.subscribe();
    session.activate(project.clone());
    println!("Watching {} (Ctrl-C to stop)", project);

    let mut last_status: Option<PipelineStatus> = None;
    let mut last_message: Option<String> = None;

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();

        if last_status != Some(snapshot.status) {
            println!("status: {}", snapshot.status);
            last_status = Some(snapshot.status);

            if let Some(plan) = snapshot.plan() {
                println!("Edit plan ({} insertion(s)):", plan.len());
                output::print_plan(plan);
            }

            let enabled = ActionSet::derive(&snapshot).enabled();
            if !enabled.is_empty() {
                let next: Vec<String> = enabled
                    .iter()
                    .map(|a| format!("reel {} {}", subcommand_for(*a), project))
                    .collect();
                println!("  next: {}", next.join(", "));
            }
        }

        if snapshot.status_message != last_message {
            if let Some(message) = &snapshot.status_message {
                println!("  {}", message);
            }
            last_message = snapshot.status_message.clone();
        }

        if snapshot.status.is_terminal() {
            match snapshot.status {
                PipelineStatus::Completed => {
                    println!("Done. Fetch the video with: reel download {} <out>", project);
                }
                _ => {
                    println!("Pipeline failed; start a new project to retry.");
                }
            }
            break;
        }
    }

    Ok(())
}

fn subcommand_for(action: Action) -> &'static str {
    match action {
        Action::AnalyzeBroll => "analyze",
        Action::GeneratePlan => "plan",
        Action::Render => "render",
        Action::Download => "download",
    }
}
