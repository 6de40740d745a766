//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ghx/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::github::client::{
    DEFAULT_BASE_URL, DEFAULT_REPO_PAGE_SIZE, DEFAULT_SEARCH_PAGE_SIZE, default_user_agent,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GhxConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GithubConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub search_page_size: Option<u32>,
    pub repo_page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BehaviorConfig {
    pub drop_stale_responses: Option<bool>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub user_agent: String,
    pub search_page_size: u32,
    pub repo_page_size: u32,
    pub drop_stale_responses: bool,
}

/// Values taken from the command line. `None` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
}

pub const BASE_URL_ENV: &str = "GHX_BASE_URL";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ghx/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ghx").join("config.toml"))
}

/// Load config from `~/.ghx/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GhxConfig::default()`.
pub fn load_config() -> Result<GhxConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(GhxConfig::default());
    };
    load_config_from(&path)
}

/// Load config from an explicit path, generating a default file if absent.
pub fn load_config_from(path: &Path) -> Result<GhxConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GhxConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GhxConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# ghx configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [github]
# base_url = "https://api.github.com"   # Or set GHX_BASE_URL
# user_agent = "ghx"
# search_page_size = 5
# repo_page_size = 100

# [behavior]
# drop_stale_responses = true            # false: last response to arrive wins
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GhxConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(BASE_URL_ENV).ok())
}

fn resolve_with_env(
    config: &GhxConfig,
    cli: &CliOverrides<'_>,
    env_base_url: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(str::to_string)
        .or(env_base_url.filter(|s| !s.is_empty()))
        .or_else(|| config.github.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        base_url,
        user_agent: config
            .github
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent),
        search_page_size: config
            .github
            .search_page_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_SEARCH_PAGE_SIZE),
        repo_page_size: config
            .github
            .repo_page_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_REPO_PAGE_SIZE),
        drop_stale_responses: config.behavior.drop_stale_responses.unwrap_or(true),
    }
}
