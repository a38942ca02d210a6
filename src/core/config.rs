//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.poikatsu/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::history::HistoryEntry;
use crate::core::ledger::{DEFAULT_SEED_BALANCE, Seed};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PoikatsuConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Open service links in a browser. When false they are only logged.
    pub open_links: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SeedConfig {
    pub balance: Option<i64>,
    /// Replaces the built-in seed history when present (even if empty).
    pub history: Option<Vec<HistoryEntry>>,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub balance: Option<i64>,
    pub open_links: Option<bool>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub seed: Seed,
    pub open_links: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            seed: Seed::default(),
            open_links: true,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.poikatsu/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".poikatsu").join("config.toml"))
}

/// Load config from `~/.poikatsu/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PoikatsuConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PoikatsuConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PoikatsuConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PoikatsuConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<PoikatsuConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PoikatsuConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Poikatsu Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# open_links = true                  # false: log service links instead of opening a browser

# [seed]
# balance = 1250                     # Or set POIKATSU_SEED_BALANCE env var

# [[seed.history]]                   # Replaces the built-in history when present
# id = 1
# date = "2025-08-27"
# category = "earned"                # "earned", "used", "bonus", "other"
# points = 100
# note = "Campaign"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PoikatsuConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &PoikatsuConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Seed balance: CLI → env → config → default
    let balance = cli
        .balance
        .or_else(|| env_parsed(&env, "POIKATSU_SEED_BALANCE", |v| v.parse::<i64>().ok()))
        .or(config.seed.balance)
        .unwrap_or(DEFAULT_SEED_BALANCE);

    // Open links: CLI → env → config → default
    let open_links = cli
        .open_links
        .or_else(|| env_parsed(&env, "POIKATSU_OPEN_LINKS", parse_bool))
        .or(config.general.open_links)
        .unwrap_or(true);

    let history = config
        .seed
        .history
        .clone()
        .unwrap_or_else(|| Seed::default().history);

    let seed = Seed { balance, history };
    validate_seed(&seed)?;

    Ok(ResolvedConfig { seed, open_links })
}

fn env_parsed<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = env(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!("Ignoring {}={:?}: not a valid value", key, raw);
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_seed(seed: &Seed) -> Result<(), ConfigError> {
    if seed.balance < 0 {
        return Err(ConfigError::Invalid(format!(
            "seed balance must not be negative (got {})",
            seed.balance
        )));
    }
    let mut seen = HashSet::new();
    for entry in &seed.history {
        if !seen.insert(entry.id) {
            return Err(ConfigError::Invalid(format!("duplicate seed history id {}", entry.id)));
        }
    }
    Ok(())
}
