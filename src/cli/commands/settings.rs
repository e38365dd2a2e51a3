use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::config::{Config, SETTING_NAMES};

#[derive(Args)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommands,
}

#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Show current settings
    Show,
    /// Get the value of a specific setting
    Get {
        /// Setting name, e.g. editor.history_limit
        name: String,
    },
    /// Set the value of a specific setting
    Set {
        /// Setting name
        name: String,
        /// Setting value
        value: String,
    },
    /// Reset a setting to its default value
    Reset {
        /// Setting name
        name: String,
    },
}

pub fn settings_command(args: SettingsCommands, mut config: Config) -> Result<()> {
    match args.command {
        SettingsSubcommands::Show => {
            println!();
            println!("  {}", "Settings:".bright_white().bold());
            for name in SETTING_NAMES {
                println!("  {:24} {}", name.bright_cyan(), config.get(name)?);
            }
            println!();
            println!("  {}", format!("Config file: {}", Config::get_config_path()?.display()).dimmed());
        }
        SettingsSubcommands::Get { name } => {
            println!("{}", config.get(&name)?);
        }
        SettingsSubcommands::Set { name, value } => {
            config.set(&name, &value)?;
            config.save()?;
            println!("{} {} = {}", "✓".bright_green().bold(), name, config.get(&name)?);
        }
        SettingsSubcommands::Reset { name } => {
            config.reset(&name)?;
            config.save()?;
            println!(
                "{} {} reset to {}",
                "✓".bright_green().bold(),
                name,
                config.get(&name)?
            );
        }
    }
    Ok(())
}
