use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::form::{FormAction, replay};

use super::{history_for, load_draft};

#[derive(Args)]
pub struct ApplyArgs {
    /// JSON file holding a list of actions, e.g. [{"type": "ADD_QUESTION"}]
    pub actions: PathBuf,
    /// Draft to start from (defaults to a blank questionnaire)
    #[arg(long)]
    pub from: Option<PathBuf>,
    /// Write the result here instead of printing it
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn load_actions(path: &Path) -> Result<Vec<FormAction>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read action file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse action file: {:?}", path))
}

pub fn apply_command(args: ApplyArgs, config: &Config) -> Result<()> {
    let actions = load_actions(&args.actions)?;
    let draft = load_draft(args.from.as_deref(), config)?;

    let unknown = actions.iter().filter(|a| matches!(a, FormAction::Unknown)).count();
    let state = replay(history_for(draft, config), &actions);
    info!(
        "Replayed {} actions ({} unknown), {} undo steps left",
        actions.len(),
        unknown,
        state.past_len()
    );

    let problems = state.present().validate();
    for problem in &problems {
        eprintln!("{} {}", "⚠".bright_yellow().bold(), problem);
    }

    match args.out {
        Some(path) => {
            state.present().save(&path)?;
            eprintln!(
                "{} Applied {} actions, draft written to {}",
                "✓".bright_green().bold(),
                actions.len(),
                path.display()
            );
        }
        None => {
            let json = serde_json::to_string_pretty(state.present())
                .context("Failed to serialize questionnaire")?;
            println!("{}", json);
        }
    }

    if unknown > 0 {
        eprintln!("  {}", format!("{} unknown actions were ignored", unknown).dimmed());
    }
    Ok(())
}
