use env_logger::{Builder, Env, Target};
use std::path::Path;

pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Loads `env_file`, or `.env` from the working directory or its parents.
/// A missing file is fine, the variables may already be set.
pub fn load_env(env_file: Option<&Path>) -> Result<(), dotenvy::Error> {
    let loaded = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match loaded {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}

/// Stdout logger filtered by `filter_env`, `info` when unset. Call after
/// [`load_env`] so the filter can come from the env file.
pub fn logger(filter_env: &str) -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(filter_env, "info"));
    builder.target(Target::Stdout);
    builder
}
