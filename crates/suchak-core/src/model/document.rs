// ── The console document ──

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::audit::AuditLog;
use super::device::Device;
use super::group::Group;
use super::incident::Incident;
use super::stats::{DashboardStats, MessageStat};
use super::user::User;

/// The whole-session administrative document.
///
/// Loaded once at session start and replaced wholesale on every
/// mutation. Foreign keys between the arrays are advisory -- every
/// cross-entity lookup returns `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminData {
    pub users: Vec<User>,
    pub devices: Vec<Device>,
    pub groups: Vec<Group>,
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub messages_stats: Vec<MessageStat>,
    pub audit_logs: Vec<AuditLog>,
    pub dashboard_stats: DashboardStats,
}

impl AdminData {
    /// Read and parse the document from a JSON file.
    ///
    /// This is the session's single external read; any failure here is
    /// fatal to session start.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::DocumentRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CoreError::DocumentParse {
            path: path.display().to_string(),
            source,
        })
    }

    // ── Optional lookups ─────────────────────────────────────────────

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.group_id == group_id)
    }

    pub fn incident(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    /// Owner display name for a device, or `None` when the foreign key
    /// is orphaned.
    pub fn device_owner(&self, device: &Device) -> Option<&User> {
        self.user(&device.user_id)
    }
}
