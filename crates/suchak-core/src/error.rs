// ── Core error types ──
//
// User-facing errors from suchak-core. Consumers never see raw IO or
// serde failures for anything other than the initial document load --
// that load is the only external input, and a failure there is fatal
// to session construction.

use thiserror::Error;

/// Error type shared by every core operation.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Document load errors (fatal to session start) ────────────────
    #[error("Cannot read data document at {path}: {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data document at {path}: {source}")]
    DocumentParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: Entity, identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Role '{role}' is not permitted to {operation}")]
    Forbidden { role: String, operation: String },

    // ── Store errors ─────────────────────────────────────────────────
    #[error("Stale commit: document moved from version {expected} to {actual}")]
    StaleWrite { expected: u64, actual: u64 },

    // ── Export errors ────────────────────────────────────────────────
    #[error("Cannot serialize export rows: {0}")]
    ExportSerialize(#[source] serde_json::Error),

    #[error("Cannot write export file {path}: {source}")]
    ExportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Entity kinds used in lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    User,
    Device,
    Group,
    Incident,
    Setting,
}

impl CoreError {
    /// Shorthand for a lookup miss.
    pub fn not_found(entity: Entity, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.into(),
        }
    }

    /// Shorthand for a validation failure.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
