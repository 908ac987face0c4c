// ── User domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User lifecycle status.
///
/// Status only changes through explicit approve/suspend/activate
/// actions; users are never deleted.
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
pub enum UserStatus {
    Active,
    Pending,
    Suspended,
}

impl UserStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A platform member as seen by the console.
///
/// `role` is the member's free-text organizational role, not a console
/// role. `device_id` may reference a device that no longer exists --
/// consumers must treat the lookup as optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    pub service_id: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
    pub device_id: Option<String>,
    pub verified: bool,
    pub joined_at: DateTime<Utc>,
    pub groups: u32,
}
