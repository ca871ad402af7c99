//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lira/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LiraConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Style overrides keyed by class name (`text`, `list-item.focused`, ...).
    #[serde(default)]
    pub theme: BTreeMap<String, ThemeEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub books_dir: Option<String>,
    pub nav_width: Option<u16>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ThemeEntry {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NAV_WIDTH: u16 = 32;
pub const MIN_NAV_WIDTH: u16 = 12;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub books_dir: PathBuf,
    pub nav_width: u16,
    pub log_level: LevelFilter,
    pub theme: BTreeMap<String, ThemeEntry>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.lira/`.
pub fn lira_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lira"))
}

/// Returns the path to `~/.lira/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    lira_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.lira/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LiraConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LiraConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LiraConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LiraConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LiraConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: LiraConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r##"# Lira Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# books_dir = "~/.lira/books"        # Or set LIRA_BOOKS_DIR
# nav_width = 32                     # Width of the navigation panel
# log_level = "debug"                # Or set LIRA_LOG_LEVEL

# Style overrides. Keys are style classes: text, strong, emphasis, literal,
# paragraph, code-block, prompt, test-block, section, separator, title,
# list-item, list-item.focused
#
# [theme."list-item.focused"]
# fg = "white"
# bg = "#0055aa"
#
# [theme.prompt]
# bg = "#999999"
"##;

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

/// CLI overrides (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub books_dir: Option<PathBuf>,
    pub nav_width: Option<u16>,
    pub log_level: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LiraConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Books directory: CLI → env → config → ~/.lira/books
    let books_dir = cli
        .books_dir
        .clone()
        .or_else(|| std::env::var("LIRA_BOOKS_DIR").ok().map(|d| expand_home(&d)))
        .or_else(|| config.general.books_dir.as_deref().map(expand_home))
        .or_else(|| lira_dir().map(|d| d.join("books")))
        .unwrap_or_else(|| PathBuf::from("books"));

    let nav_width = cli
        .nav_width
        .or(config.general.nav_width)
        .unwrap_or(DEFAULT_NAV_WIDTH)
        .max(MIN_NAV_WIDTH);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LIRA_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log level {:?}, using default", level);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        books_dir,
        nav_width,
        log_level,
        theme: config.theme.clone(),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
