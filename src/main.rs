use anyhow::Result;
use clap::Parser;
use log::info;

use questionary_cli::cli::commands::{
    apply_command, new_command, settings_command, stats_command, submit_command, token_command,
};
use questionary_cli::cli::{Cli, Commands};
use questionary_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("questionary-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // Pick up QUESTIONARY_TOKEN and friends from a local .env file
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {:?}", path);
    }

    let cli = Cli::parse();
    let config = Config::load()?;
    info!("Starting questionary-cli against {}", config.api.base_url);

    match cli.command {
        Commands::New(args) => new_command(args, &config).await,
        Commands::Apply(args) => apply_command(args, &config),
        Commands::Submit(args) => submit_command(args, &config).await,
        Commands::Stats(args) => stats_command(args, &config).await,
        Commands::Token(args) => token_command(args),
        Commands::Settings(args) => settings_command(args, config),
    }
}
