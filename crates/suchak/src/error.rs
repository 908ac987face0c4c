//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use suchak_core::{CoreError, Entity};

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const DATA: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Document load ────────────────────────────────────────────────

    #[error("Could not load the administrative document")]
    #[diagnostic(
        code(suchak::data_load),
        help(
            "The console cannot start without its document.\n\
             Point --data (or SUCHAK_DATA_PATH, or data_path in config.toml)\n\
             at a readable admin_data.json."
        )
    )]
    DataLoad {
        #[source]
        source: CoreError,
    },

    // ── Access ───────────────────────────────────────────────────────

    #[error("The {page} page is not available to the {role} role")]
    #[diagnostic(
        code(suchak::page_forbidden),
        help("Sign in with a role that can open this page, e.g. --role super-admin.")
    )]
    PageForbidden { role: String, page: String },

    #[error("The {role} role is not permitted to {operation}")]
    #[diagnostic(
        code(suchak::action_forbidden),
        help("Management actions need the super-admin or group-admin role.")
    )]
    ActionForbidden { role: String, operation: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(suchak::not_found),
        help("Run: suchak {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(suchak::validation))]
    Validation { field: String, reason: String },

    // ── Concurrency ──────────────────────────────────────────────────

    #[error("The document changed underneath this action")]
    #[diagnostic(
        code(suchak::stale_write),
        help("Another commit won the race; re-run the command against the fresh state.")
    )]
    StaleWrite,

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(suchak::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Export ───────────────────────────────────────────────────────

    #[error("CSV export failed")]
    #[diagnostic(
        code(suchak::export),
        help("Check that the export directory exists and is writable (--export-dir).")
    )]
    Export {
        #[source]
        source: CoreError,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(suchak::config))]
    Config(Box<suchak_config::ConfigError>),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<suchak_config::ConfigError> for CliError {
    fn from(err: suchak_config::ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DataLoad { .. } => exit_code::DATA,
            Self::PageForbidden { .. } | Self::ActionForbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::StaleWrite => exit_code::CONFLICT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

fn list_command_for(entity: Entity) -> &'static str {
    match entity {
        Entity::User => "users list",
        Entity::Device => "devices list",
        Entity::Group => "groups list",
        Entity::Incident => "incidents list",
        Entity::Setting => "settings show",
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DocumentRead { .. } | CoreError::DocumentParse { .. } => {
                CliError::DataLoad { source: err }
            }

            CoreError::NotFound { entity, identifier } => CliError::NotFound {
                resource_type: entity.to_string(),
                identifier,
                list_command: list_command_for(entity).to_string(),
            },

            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::Forbidden { role, operation } => {
                CliError::ActionForbidden { role, operation }
            }

            CoreError::StaleWrite { .. } => CliError::StaleWrite,

            CoreError::ExportSerialize(_) | CoreError::ExportWrite { .. } => {
                CliError::Export { source: err }
            }
        }
    }
}
