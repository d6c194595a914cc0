//! Application configuration module.
//!
//! Manages the TOML config file holding the venue feed endpoints and
//! request timeout.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, FeedConfig};
pub use paths::resolve_config_path;
