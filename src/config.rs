use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::form::IdPolicy;
use crate::model::{DEFAULT_ANSWERS_LIMIT, DEFAULT_WINDOW_DAYS, DraftDefaults, MAX_WINDOW_DAYS};

/// Names accepted by `settings get|set|reset`
pub const SETTING_NAMES: [&str; 6] = [
    "api.base_url",
    "api.timeout_secs",
    "editor.history_limit",
    "editor.id_policy",
    "editor.answers_limit",
    "editor.window_days",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Maximum number of undo steps; absent means unbounded
    #[serde(default)]
    pub history_limit: Option<usize>,
    #[serde(default)]
    pub id_policy: IdPolicy,
    #[serde(default = "default_answers_limit")]
    pub answers_limit: u32,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_answers_limit() -> u32 {
    DEFAULT_ANSWERS_LIMIT
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_limit: None,
            id_policy: IdPolicy::default(),
            answers_limit: default_answers_limit(),
            window_days: default_window_days(),
        }
    }
}

impl EditorSettings {
    /// Reject values a draft cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.answers_limit == 0 {
            anyhow::bail!("Answers limit must be positive");
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            anyhow::bail!("Window length must be between 0 and {} days", MAX_WINDOW_DAYS);
        }
        Ok(())
    }

    pub fn draft_defaults(&self) -> DraftDefaults {
        DraftDefaults {
            answers_limit: self.answers_limit,
            window_days: self.window_days,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub editor: EditorSettings,
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("questionary-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".questionary-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config
            .editor
            .validate()
            .with_context(|| format!("Invalid editor settings in {:?}", config_path))?;

        debug!("Loaded config for API {}", config.api.base_url);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Current value of a named setting, formatted for display
    pub fn get(&self, name: &str) -> Result<String> {
        let value = match name {
            "api.base_url" => self.api.base_url.clone(),
            "api.timeout_secs" => self.api.timeout_secs.to_string(),
            "editor.history_limit" => self
                .editor
                .history_limit
                .map_or_else(|| "unbounded".to_string(), |limit| limit.to_string()),
            "editor.id_policy" => self.editor.id_policy.to_string(),
            "editor.answers_limit" => self.editor.answers_limit.to_string(),
            "editor.window_days" => self.editor.window_days.to_string(),
            other => anyhow::bail!("Unknown setting '{}'", other),
        };
        Ok(value)
    }

    /// Parse `value` and assign it to the named setting (not saved)
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "api.base_url" => {
                let trimmed = value.trim().trim_end_matches('/');
                if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                    anyhow::bail!("Base URL must start with http:// or https://");
                }
                self.api.base_url = trimmed.to_string();
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout '{}'", value))?;
            }
            "editor.history_limit" => {
                self.editor.history_limit = match value {
                    "unbounded" | "none" | "" => None,
                    limit => Some(
                        limit
                            .parse()
                            .with_context(|| format!("Invalid history limit '{}'", limit))?,
                    ),
                };
            }
            "editor.id_policy" => self.editor.id_policy = value.parse()?,
            "editor.answers_limit" => {
                let limit: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid answers limit '{}'", value))?;
                if limit == 0 {
                    anyhow::bail!("Answers limit must be positive");
                }
                self.editor.answers_limit = limit;
            }
            "editor.window_days" => {
                let days: i64 = value
                    .parse()
                    .with_context(|| format!("Invalid window length '{}'", value))?;
                if !(0..=MAX_WINDOW_DAYS).contains(&days) {
                    anyhow::bail!("Window length must be between 0 and {} days", MAX_WINDOW_DAYS);
                }
                self.editor.window_days = days;
            }
            other => anyhow::bail!("Unknown setting '{}'", other),
        }
        info!("Set {} = {}", name, value);
        Ok(())
    }

    /// Restore the default value of a named setting (not saved)
    pub fn reset(&mut self, name: &str) -> Result<()> {
        let defaults = Config::default();
        let value = defaults.get(name)?;
        match name {
            "editor.history_limit" => self.editor.history_limit = None,
            _ => self.set(name, &value)?,
        }
        Ok(())
    }
}
