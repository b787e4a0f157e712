// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use anyhow::Result;
use clap::ValueEnum;
use reel_core::{ActionSet, EditStep, ProjectListEntry, ProjectMetadata};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print one status snapshot.
pub fn print_status(metadata: &ProjectMetadata, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(metadata)?),
        OutputFormat::Text => {
            println!("status: {}", metadata.status);
            if let Some(message) = &metadata.status_message {
                println!("  {}", message);
            }
            if metadata.status.in_flight() {
                println!("  stage running remotely; follow it with: reel watch <project>");
            }
            println!("  a-roll: {:.1}s", metadata.a_roll_duration);
            println!("  b-roll clips: {}", metadata.b_roll_count);
            if let Some(plan) = metadata.plan() {
                println!("  edit plan: {} insertion(s)", plan.len());
                print_plan(plan);
            }
            let enabled = ActionSet::derive(metadata).enabled();
            if !enabled.is_empty() {
                let names: Vec<&str> = enabled.iter().map(|a| a.name()).collect();
                println!("  available: {}", names.join(", "));
            }
        }
    }
    Ok(())
}

/// Print the project library listing.
pub fn print_library(entries: &[ProjectListEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No projects");
                return Ok(());
            }
            println!("{:<12} {:<24} PLAN", "ID", "NAME");
            for entry in entries {
                let id = &entry.project_id.0;
                let plan = entry
                    .edit_plan
                    .as_ref()
                    .map(|p| format!("{} step(s)", p.len()))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:<24} {}",
                    &id[..12.min(id.len())],
                    &entry.name[..24.min(entry.name.len())],
                    plan
                );
            }
        }
    }
    Ok(())
}

/// Print edit-plan steps in timeline order.
pub fn print_plan(steps: &[EditStep]) {
    for (i, step) in steps.iter().enumerate() {
        println!(
            "  {:>2}. @{:>6.1}s  +{:>4.1}s  {}  ({})",
            i + 1,
            step.start_in_aroll,
            step.duration,
            step.broll_id,
            step.reason
        );
    }
}
