use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use colored::*;
use log::info;

use crate::api::{DateRange, MISSING_TOKEN_MESSAGE, QuestionaryClient, StatisticsSource};
use crate::auth::TokenChain;
use crate::config::Config;

#[derive(Args)]
pub struct StatsArgs {
    /// First day to include (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD, defaults to a week after the start)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

/// Range for the given bounds; a missing bound is a week away from the other one
pub fn resolve_range(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Result<DateRange> {
    match (from, to) {
        (None, None) => Ok(DateRange::week_from(today)),
        (Some(from), None) => Ok(DateRange::week_from(from)),
        (None, Some(to)) => DateRange::new(to - Duration::days(7), to),
        (Some(from), Some(to)) => DateRange::new(from, to),
    }
}

pub async fn stats_command(args: StatsArgs, config: &Config) -> Result<()> {
    let range = resolve_range(args.from, args.to, Local::now().date_naive())?;

    let Some((token, origin)) = TokenChain::standard(&Config::config_dir()?).resolve()? else {
        anyhow::bail!(MISSING_TOKEN_MESSAGE);
    };
    info!("Fetching statistics with token from {}", origin);

    let client = QuestionaryClient::new(&config.api)?;
    let summary = client.statistics(range, &token).await?;

    println!();
    println!(
        "  {} {} → {}",
        "Statistics".bright_white().bold(),
        range.from,
        range.to
    );
    println!("  Total responses:        {}", summary.total_responses.to_string().bright_cyan());
    println!(
        "  Active questionnaires:  {}",
        summary.total_questionnaires_active.to_string().bright_cyan()
    );
    println!(
        "  Average response rate:  {}",
        format!("{:.1}%", summary.average_response_rate).bright_cyan()
    );
    println!(
        "  {}",
        format!(
            "{} response points, {} completion points, {} satisfaction points",
            summary.response_data.len(),
            summary.completion_rate_data.len(),
            summary.satisfaction_data.len()
        )
        .dimmed()
    );
    println!();
    Ok(())
}
