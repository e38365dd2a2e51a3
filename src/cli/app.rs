use super::commands::apply::ApplyArgs;
use super::commands::new::NewArgs;
use super::commands::settings::SettingsCommands;
use super::commands::stats::StatsArgs;
use super::commands::submit::SubmitArgs;
use super::commands::token::TokenCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "questionary-cli")]
#[command(about = "Build questionnaires in the terminal and publish them to the questionnaire service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive questionnaire editor
    New(NewArgs),
    /// Replay a JSON list of edit actions against a draft
    Apply(ApplyArgs),
    /// Submit a draft file to the questionnaire service
    Submit(SubmitArgs),
    /// Show aggregate response statistics
    Stats(StatsArgs),
    /// Manage the bearer token used for the questionnaire service
    Token(TokenCommands),
    /// Application settings management
    Settings(SettingsCommands),
}
