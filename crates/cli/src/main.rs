// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reel - CLI for the automated B-roll editing pipeline

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{action, project, upload, watch};
use reel_backend::HttpBackend;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(
    name = "reel",
    version,
    about = "Drive the remote B-roll editing pipeline"
)]
struct Cli {
    /// Backend base URL (also: REEL_URL env var)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project
    Create(project::CreateArgs),
    /// List projects in the library
    List(project::ListArgs),
    /// Upload the primary A-roll video
    UploadAroll(upload::ArollArgs),
    /// Upload supplementary B-roll clips
    UploadBroll(upload::BrollArgs),
    /// Start transcription of the uploaded A-roll
    Transcribe(action::StepArgs),
    /// Analyze the B-roll library (needs a finished transcription)
    Analyze(action::StepArgs),
    /// Generate the edit plan from the analyzed clips
    Plan(action::StepArgs),
    /// Render the final video from the edit plan
    Render(action::StepArgs),
    /// Download the rendered video
    Download(action::DownloadArgs),
    /// Fetch the current pipeline status once
    Status(watch::StatusArgs),
    /// Poll the pipeline and stream status changes until it finishes
    Watch(watch::WatchArgs),
}

// The core's ordering guarantees assume cooperative single-threaded
// scheduling; keep the runtime on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("REEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .url
        .clone()
        .or_else(|| std::env::var("REEL_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let backend = HttpBackend::new(base_url);

    match cli.command {
        Commands::Create(args) => project::create(backend, args).await,
        Commands::List(args) => project::list(backend, args).await,
        Commands::UploadAroll(args) => upload::a_roll(backend, args).await,
        Commands::UploadBroll(args) => upload::b_roll(backend, args).await,
        Commands::Transcribe(args) => action::transcribe(backend, args).await,
        Commands::Analyze(args) => action::analyze(backend, args).await,
        Commands::Plan(args) => action::plan(backend, args).await,
        Commands::Render(args) => action::render(backend, args).await,
        Commands::Download(args) => action::download(backend, args).await,
        Commands::Status(args) => watch::status(backend, args).await,
        Commands::Watch(args) => watch::watch(backend, args).await,
    }
}
