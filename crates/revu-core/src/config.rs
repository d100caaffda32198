//! Configuration management for revu
//!
//! Supports feature-specific configuration sections:
//! - [review] - diff filtering and chunking settings
//! - [provider] - language-model backend selection and credentials

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: &str = "1";

/// Supported configuration versions
pub const SUPPORTED_CONFIG_VERSIONS: &[&str] = &["1"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration structure supporting multiple sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version for tracking schema changes
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Review pipeline configuration
    #[serde(default)]
    pub review: Option<ReviewOptions>,

    /// Language-model provider configuration
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            review: None,
            provider: None,
        }
    }
}

/// Options consumed by the diff pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOptions {
    /// Glob patterns for files that should never be reviewed
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// When set and non-empty, only matching files are reviewed
    #[serde(default)]
    pub include_only: Option<Vec<String>>,

    /// Cap on the number of files per review run
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Line budget (additions + deletions) per chunk
    #[serde(default = "default_max_diff_size")]
    pub max_diff_size: usize,

    /// Review aspects to emphasize in the prompt
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            include_only: None,
            max_files: default_max_files(),
            max_diff_size: default_max_diff_size(),
            focus_areas: Vec::new(),
        }
    }
}

/// Language-model backend selection. Each kind carries its own required
/// credential, so an incomplete section fails at parse time instead of at
/// request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAi {
        api_key: String,
        #[serde(default = "default_openai_model")]
        model: String,
    },
    Anthropic {
        api_key: String,
        #[serde(default = "default_anthropic_model")]
        model: String,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
}

// Default value functions for root Config
fn default_config_version() -> String {
    CURRENT_CONFIG_VERSION.to_string()
}

// Default value functions for Review
fn default_ignore() -> Vec<String> {
    [
        "*.min.js",
        "*.min.css",
        "*.lock",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "**/node_modules/**",
        "**/vendor/**",
        "**/dist/**",
        "**/target/**",
        "*.snap",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_files() -> usize {
    50
}

fn default_max_diff_size() -> usize {
    2000
}

// Default value functions for Provider
fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1".to_string()
}

impl Config {
    /// Check if the configuration version is supported
    pub fn is_version_supported(&self) -> bool {
        SUPPORTED_CONFIG_VERSIONS.contains(&self.version.as_str())
    }

    /// Get a warning message for unsupported versions
    pub fn version_warning(&self) -> Option<String> {
        if !self.is_version_supported() {
            Some(format!(
                "Warning: Configuration version '{}' is not supported. Supported versions: {}. Using defaults where needed.",
                self.version,
                SUPPORTED_CONFIG_VERSIONS.join(", ")
            ))
        } else {
            None
        }
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        if let Some(warning) = config.version_warning() {
            tracing::warn!("{}", warning);
        }

        // Set to current version if empty or missing
        if config.version.is_empty() {
            config.version = CURRENT_CONFIG_VERSION.to_string();
        }

        Ok(config)
    }

    /// Get the default config directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("revu"))
    }

    /// Load configuration with priority:
    /// 1. Defaults
    /// 2. Global config (~/.config/revu/config.toml)
    /// 3. Repo config (.revu.toml)
    pub fn load() -> Self {
        let mut config = Self::default();

        // Try to load global config
        if let Some(config_dir) = Self::get_config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                if let Ok(loaded) = Self::load_from_file(&global_config) {
                    config = config.merge(loaded);
                }
            }
        }

        // Try to load repo config
        let repo_config = PathBuf::from(".revu.toml");
        if repo_config.exists() {
            if let Ok(loaded) = Self::load_from_file(&repo_config) {
                config = config.merge(loaded);
            }
        }

        config
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(mut self, other: Config) -> Self {
        if other.version != CURRENT_CONFIG_VERSION || !other.version.is_empty() {
            self.version = other.version;
        }

        if other.review.is_some() {
            self.review = other.review;
        }
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        self
    }

    /// Review options with defaults applied when the section is absent
    pub fn review_options(&self) -> ReviewOptions {
        self.review.clone().unwrap_or_default()
    }
}
