//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.faqchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FaqchatConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub welcome: WelcomeConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WelcomeConfig {
    pub text: Option<String>,
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub faqs_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/chat";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const ENDPOINT_ENV_VAR: &str = "FAQCHAT_ENDPOINT";

pub const DEFAULT_WELCOME_TEXT: &str = "Hi! I'm the Internship Assistant FAQ Bot. \
    Ask me about tasks, submission, certificates, or duration.";

pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "What tasks do I need to complete?",
    "How do I submit my work?",
    "When will I get my certificate?",
    "How long is the internship?",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub welcome_text: String,
    pub suggestions: Vec<String>,
    pub bind: String,
    /// None = use the FAQ set bundled in the binary.
    pub faqs_file: Option<PathBuf>,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub bind: Option<String>,
    pub faqs_file: Option<PathBuf>,
}

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

/// Returns `~/.faqchat/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".faqchat"))
}

/// Returns the path to `~/.faqchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.faqchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FaqchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FaqchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FaqchatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FaqchatConfig::default());
    }

    load_config_from(&path)
}

/// Parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<FaqchatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FaqchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# faqchat Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [client]
# endpoint = "http://localhost:5000/chat"   # Or set FAQCHAT_ENDPOINT

# [welcome]
# text = "Hi! I'm the Internship Assistant FAQ Bot."
# suggestions = [
#     "How do I submit my work?",
#     "How long is the internship?",
# ]

# [server]
# bind = "127.0.0.1:5000"
# faqs_file = "faqs.json"   # Path relative to ~/.faqchat/
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
pub fn resolve(config: &FaqchatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(ENDPOINT_ENV_VAR).ok())
}

/// Same as [`resolve`], with the endpoint env var passed in.
pub fn resolve_with_env(
    config: &FaqchatConfig,
    cli: &CliOverrides,
    env_endpoint: Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or(env_endpoint)
        .or_else(|| config.client.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let welcome_text = config
        .welcome
        .text
        .clone()
        .unwrap_or_else(|| DEFAULT_WELCOME_TEXT.to_string());

    let suggestions = config
        .welcome
        .suggestions
        .clone()
        .unwrap_or_else(|| DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect());

    // Bind: CLI → config → default
    let bind = cli
        .bind
        .clone()
        .or_else(|| config.server.bind.clone())
        .unwrap_or_else(|| DEFAULT_BIND.to_string());

    // FAQ file: CLI path as given, config path relative to ~/.faqchat/
    let faqs_file = cli.faqs_file.clone().or_else(|| {
        config
            .server
            .faqs_file
            .as_ref()
            .map(|file| match config_dir() {
                Some(dir) => dir.join(file),
                None => PathBuf::from(file),
            })
    });

    ResolvedConfig {
        endpoint,
        welcome_text,
        suggestions,
        bind,
        faqs_file,
    }
}
