use anyhow::Result;
use clap::Args;
use colored::*;
use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::tui::apps::FormEditor;
use crate::tui::apps::form_editor::State;
use crate::tui::{Runtime, Theme, terminal};

use super::{build_submitter, history_for, load_draft};

#[derive(Args)]
pub struct NewArgs {
    /// Start from an existing draft instead of a blank questionnaire
    #[arg(long)]
    pub from: Option<PathBuf>,
    /// Write the draft to this file when the editor closes
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub async fn new_command(args: NewArgs, config: &Config) -> Result<()> {
    let draft = load_draft(args.from.as_deref(), config)?;
    info!("Opening editor for questionnaire {}", draft.id);

    let state = State::new(history_for(draft, config), build_submitter(config)?);
    let mut runtime: Runtime<FormEditor> = Runtime::new(state, Theme::default());
    terminal::launch(&mut runtime).await?;

    let state = runtime.state();
    if let Some(receipt) = state.last_receipt() {
        println!(
            "{} Questionnaire '{}' created ({} questions)",
            "✓".bright_green().bold(),
            receipt.title.bright_yellow().bold(),
            receipt.question_count
        );
    }

    if let Some(path) = args.save {
        state.document().save(&path)?;
        println!("{} Draft saved to {}", "✓".bright_green().bold(), path.display());
    }

    Ok(())
}
