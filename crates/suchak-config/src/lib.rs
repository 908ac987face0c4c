//! Shared configuration for the SUCHAK admin console.
//!
//! TOML config file merged with `SUCHAK_`-prefixed environment
//! variables. The console only needs a handful of knobs: where the
//! administrative document lives, which role the operator signs in
//! with by default, output defaults, and the simulated commit latency.

use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use suchak_core::Role;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Path to the administrative JSON document.
    pub data_path: Option<PathBuf>,

    /// Console defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Simulated remote behavior.
    #[serde(default)]
    pub simulate: Simulate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: Some(PathBuf::from("data/admin_data.json")),
            defaults: Defaults::default(),
            simulate: Simulate::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Role assumed at sign-in when no flag is given.
    #[serde(default = "default_role")]
    pub role: String,

    /// Operator display name recorded on audit entries.
    #[serde(default = "default_operator")]
    pub operator: String,

    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Directory CSV exports are written into.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            role: default_role(),
            operator: default_operator(),
            output: default_output(),
            color: default_color(),
            export_dir: default_export_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Simulate {
    /// Commit latency in milliseconds, modeling the remote round-trip
    /// behind every mutating action.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for Simulate {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_role() -> String {
    "super-admin".into()
}
fn default_operator() -> String {
    "Current User".into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_latency_ms() -> u64 {
    500
}

impl Config {
    /// Parse the configured default role into the closed role set.
    pub fn default_role(&self) -> Result<Role, ConfigError> {
        Role::from_str(&self.defaults.role).map_err(|_| ConfigError::Validation {
            field: "defaults.role".into(),
            reason: format!(
                "expected super-admin, group-admin, or auditor, got '{}'",
                self.defaults.role
            ),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("in", "suchak", "suchak").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("suchak");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path + environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SUCHAK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}
