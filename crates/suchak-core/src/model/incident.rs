// ── Incident domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit::Severity;

/// Incident triage state.
///
/// Open is initial, Resolved is terminal. The only legal transitions
/// are Open -> Investigating (acknowledge), Investigating ->
/// Investigating (re-assignment), and Investigating -> Resolved.
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
pub enum IncidentStatus {
    Open,
    Investigating,
    Resolved,
}

impl IncidentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// A security incident or alert raised against the platform.
///
/// `user_id` may be orphaned; render the subject as "Unknown" when the
/// lookup misses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub status: IncidentStatus,
    pub summary: String,
    pub description: String,
    pub assigned_to: Option<String>,
}
