use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::model::Questionary;

use super::build_submitter;

#[derive(Args)]
pub struct SubmitArgs {
    /// Draft file to submit
    pub file: PathBuf,
}

pub async fn submit_command(args: SubmitArgs, config: &Config) -> Result<()> {
    let questionary = Questionary::load(&args.file)?;
    let submitter = build_submitter(config)?;

    println!(
        "Submitting '{}' to {}...",
        questionary.title.bright_white().bold(),
        config.api.base_url.dimmed()
    );

    match submitter.submit(Arc::new(questionary)).await {
        Ok(receipt) => {
            println!(
                "{} Questionnaire {} created with {} questions",
                "✓".bright_green().bold(),
                receipt.questionary_id.to_string().bright_yellow().bold(),
                receipt.question_count
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".bright_red().bold(), e.user_message());
            Err(e.into())
        }
    }
}
