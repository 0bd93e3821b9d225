//! Bearer token lookup.

use std::path::PathBuf;

/// Environment variable holding the TMDB API read access token.
pub const TOKEN_ENV_VAR: &str = "TMDB_BEARER_TOKEN";

/// Loads `.env` from the working directory (or a parent) into the
/// process environment. Variables already set are kept.
///
/// Returns the loaded file, or `None` when there is no `.env`. Runs before
/// tracing is installed, so the caller logs the outcome.
///
/// # Errors
///
/// Returns an error if a `.env` file exists but cannot be read or parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Returns the bearer token from the environment, if present and non-empty.
#[must_use]
pub fn bearer_token() -> Option<String> {
    normalize_token(std::env::var(TOKEN_ENV_VAR).ok())
}

/// Trims surrounding whitespace and drops empty values.
fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|token| String::from(token.trim()))
        .filter(|token| !token.is_empty())
}
