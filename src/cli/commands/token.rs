use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::Password;
use log::info;

use crate::auth::{FileTokenStore, TOKEN_ENV_VAR, TokenChain};
use crate::config::Config;

#[derive(Args)]
pub struct TokenCommands {
    #[command(subcommand)]
    pub command: TokenSubcommands,
}

#[derive(Subcommand)]
pub enum TokenSubcommands {
    /// Store a bearer token in the config directory
    Set {
        /// Token value (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Remove the stored token
    Clear,
    /// Show where the token would be taken from
    Status,
}

pub fn token_command(args: TokenCommands) -> Result<()> {
    let config_dir = Config::config_dir()?;
    let store = FileTokenStore::in_dir(&config_dir);

    match args.command {
        TokenSubcommands::Set { token } => {
            let token = match token {
                Some(token) => token,
                None => Password::new().with_prompt("Bearer token").interact()?,
            };
            store.store(&token)?;
            println!("{} Token saved to {}", "✓".bright_green().bold(), store.path().display());
        }
        TokenSubcommands::Clear => {
            if store.clear()? {
                info!("Token file removed");
                println!("{} Stored token removed", "✓".bright_green().bold());
            } else {
                println!("  {}", "No stored token to remove".dimmed());
            }
        }
        TokenSubcommands::Status => match TokenChain::standard(&config_dir).resolve()? {
            Some((_, origin)) => {
                println!("{} Token available from {}", "●".bright_green().bold(), origin);
            }
            None => {
                println!("{} No token found", "○".bright_yellow().bold());
                println!(
                    "  {}",
                    format!(
                        "Set {} or run 'questionary-cli token set'",
                        TOKEN_ENV_VAR
                    )
                    .dimmed()
                );
            }
        },
    }
    Ok(())
}
