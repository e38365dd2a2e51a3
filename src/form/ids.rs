use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Question, QuestionId};

/// How ids are picked for added and cloned questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// Highest existing id plus one. Never collides with a surviving question.
    #[default]
    NextMax,
    /// Question count plus one. Legacy numbering, collides after a removal.
    Length,
}

impl IdPolicy {
    pub fn next_id(&self, questions: &[Question]) -> QuestionId {
        match self {
            IdPolicy::NextMax => questions.iter().map(|q| q.id).max().map_or(1, |max| max + 1),
            IdPolicy::Length => questions.len() as QuestionId + 1,
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::NextMax => f.write_str("next-max"),
            IdPolicy::Length => f.write_str("length"),
        }
    }
}

impl FromStr for IdPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next-max" => Ok(IdPolicy::NextMax),
            "length" => Ok(IdPolicy::Length),
            other => anyhow::bail!("Unknown id policy '{}' (expected 'next-max' or 'length')", other),
        }
    }
}
