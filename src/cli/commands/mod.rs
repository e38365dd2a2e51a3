pub mod apply;
pub mod new;
pub mod settings;
pub mod stats;
pub mod submit;
pub mod token;

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use crate::api::{QuestionaryClient, Submitter};
use crate::auth::TokenChain;
use crate::config::Config;
use crate::form::HistoryState;
use crate::model::Questionary;

pub use apply::apply_command;
pub use new::new_command;
pub use settings::settings_command;
pub use stats::stats_command;
pub use submit::submit_command;
pub use token::token_command;

/// The draft at `from`, or a fresh one built from the editor settings
fn load_draft(from: Option<&Path>, config: &Config) -> Result<Questionary> {
    match from {
        Some(path) => Questionary::load(path),
        None => Ok(Questionary::untitled(Utc::now(), config.editor.draft_defaults())),
    }
}

/// Editing history configured from the editor settings
fn history_for(draft: Questionary, config: &Config) -> HistoryState {
    HistoryState::new(draft)
        .with_id_policy(config.editor.id_policy)
        .with_limit(config.editor.history_limit)
}

/// Submitter backed by the HTTP client and the standard token chain
fn build_submitter(config: &Config) -> Result<Submitter> {
    let client = QuestionaryClient::new(&config.api)?;
    let tokens = TokenChain::standard(&Config::config_dir()?);
    Ok(Submitter::new(Arc::new(tokens), Arc::new(client)))
}
