//! Application configuration module.
//!
//! Manages the TOML config file holding query and fetch settings, and
//! the bearer token read from the environment.

#[allow(clippy::module_inception)]
mod config;
mod credentials;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig};
pub use credentials::{TOKEN_ENV_VAR, bearer_token, load_dotenv};
pub use paths::resolve_config_path;
