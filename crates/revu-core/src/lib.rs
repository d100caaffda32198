//! Core configuration and logging for revu.
//!
//! Configuration is layered: built-in defaults, then the global config at
//! `~/.config/revu/config.toml`, then the repo-local `.revu.toml`.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, ProviderConfig, ReviewOptions};
