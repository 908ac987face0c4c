// ── Audit trail domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Role;

/// Event severity, shared between incidents and audit entries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Who performed an audited action.
///
/// Serialized into the entry's `actor` string: `"<role>:<name>"` for a
/// console admin, the literal `"System"` for automated actions. Seeded
/// entries keep whatever actor string they shipped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    System,
    Admin { role: Role, name: String },
}

impl Actor {
    /// Console admin actor with the default operator name.
    pub fn admin(role: Role, name: impl Into<String>) -> Self {
        Self::Admin {
            role,
            name: name.into(),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("System"),
            Self::Admin { role, name } => write!(f, "{role}:{name}"),
        }
    }
}

/// One append-only audit record. Entries are always inserted at the
/// head of the log, so the stored order is newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    pub severity: Severity,
}
