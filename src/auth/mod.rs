pub mod token;

pub use token::{EnvTokenSource, FileTokenStore, TOKEN_ENV_VAR, TokenChain, TokenSource};
