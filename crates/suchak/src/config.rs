//! CLI configuration — thin wrapper around `suchak_config` shared types.
//!
//! Re-exports the shared types and adds flag-aware resolution: every
//! knob follows flag > environment > config file > built-in default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use suchak_core::Role;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use suchak_config::{Config, load_config_or_default};

// ── Resolved session settings ───────────────────────────────────────

/// Everything a command handler needs from flags + config, fully
/// resolved.
#[derive(Debug)]
pub struct Resolved {
    pub data_path: PathBuf,
    pub role: Role,
    pub operator: String,
    pub output: OutputFormat,
    pub color: ColorMode,
    pub export_dir: PathBuf,
    pub latency: Duration,
    pub quiet: bool,
    pub yes: bool,
}

/// Merge global flags over the loaded config.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let data_path = global
        .data
        .clone()
        .or_else(|| cfg.data_path.clone())
        .unwrap_or_else(|| PathBuf::from("data/admin_data.json"));

    let role = match global.role {
        Some(arg) => Role::from(arg),
        None => cfg.default_role()?,
    };

    let output = match &global.output {
        Some(format) => format.clone(),
        None => OutputFormat::from_str(&cfg.defaults.output).map_err(|_| {
            CliError::Validation {
                field: "defaults.output".to_string(),
                reason: format!("unknown output format '{}'", cfg.defaults.output),
            }
        })?,
    };

    let color = match &global.color {
        Some(mode) => mode.clone(),
        None => ColorMode::from_str(&cfg.defaults.color).map_err(|_| CliError::Validation {
            field: "defaults.color".to_string(),
            reason: format!("unknown color mode '{}'", cfg.defaults.color),
        })?,
    };

    Ok(Resolved {
        data_path,
        role,
        operator: global
            .operator
            .clone()
            .unwrap_or_else(|| cfg.defaults.operator.clone()),
        output,
        color,
        export_dir: global
            .export_dir
            .clone()
            .unwrap_or_else(|| cfg.defaults.export_dir.clone()),
        latency: Duration::from_millis(global.latency_ms.unwrap_or(cfg.simulate.latency_ms)),
        quiet: global.quiet,
        yes: global.yes,
    })
}
