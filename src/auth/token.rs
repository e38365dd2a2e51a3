use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const TOKEN_ENV_VAR: &str = "QUESTIONARY_TOKEN";
const TOKEN_FILE_NAME: &str = "token";

/// Somewhere a bearer token for the questionnaire backend can be found
pub trait TokenSource: Send + Sync {
    /// The stored token, or `None` when there is none
    fn token(&self) -> Result<Option<String>>;

    /// Short description used in status output and logs
    fn describe(&self) -> String;
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Token taken from the `QUESTIONARY_TOKEN` environment variable
#[derive(Debug, Clone)]
pub struct EnvTokenSource {
    var: String,
}

impl EnvTokenSource {
    pub fn new() -> Self {
        Self::with_var(TOKEN_ENV_VAR)
    }

    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for EnvTokenSource {
    fn token(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.var).ok().and_then(non_empty))
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}

/// Token persisted in a file inside the config directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the config file
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TOKEN_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("Refusing to store an empty token");
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create token directory: {:?}", parent))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file: {:?}", self.path))?;

        info!("Stored token in {:?}", self.path);
        Ok(())
    }

    /// Remove the stored token. Returns whether a token was present.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove token file: {:?}", self.path))?;
        info!("Removed token file {:?}", self.path);
        Ok(true)
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            debug!("No token file at {:?}", self.path);
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file: {:?}", self.path))?;
        Ok(non_empty(content))
    }

    fn describe(&self) -> String {
        format!("token file {}", self.path.display())
    }
}

/// Asks each source in order and returns the first token found
pub struct TokenChain {
    sources: Vec<Box<dyn TokenSource>>,
}

impl TokenChain {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    pub fn with(mut self, source: impl TokenSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Environment first, then the token file in `config_dir`
    pub fn standard(config_dir: &Path) -> Self {
        Self::new()
            .with(EnvTokenSource::new())
            .with(FileTokenStore::in_dir(config_dir))
    }

    /// The token together with a description of where it came from
    pub fn resolve(&self) -> Result<Option<(String, String)>> {
        for source in &self.sources {
            if let Some(token) = source.token()? {
                debug!("Using token from {}", source.describe());
                return Ok(Some((token, source.describe())));
            }
        }
        Ok(None)
    }
}

impl Default for TokenChain {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for TokenChain {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.resolve()?.map(|(token, _)| token))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        parts.join(", ")
    }
}
