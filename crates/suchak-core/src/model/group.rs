// ── Group domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

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
pub enum GroupType {
    Operational,
    Family,
    Veteran,
}

/// A request by a user to join a group, awaiting admin review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub user_id: String,
    pub user_name: String,
    pub requested_at: DateTime<Utc>,
    pub reason: String,
}

/// A messaging group.
///
/// `members` is a count, not a member list -- the console only tracks
/// the aggregate. Approving a join request bumps it; rejecting leaves
/// it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub group_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub members: u32,
    pub pending_requests: Vec<JoinRequest>,
    /// Message volume over the reporting window.
    pub activity: u64,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Find a pending join request by user id.
    pub fn pending_request(&self, user_id: &str) -> Option<&JoinRequest> {
        self.pending_requests.iter().find(|r| r.user_id == user_id)
    }
}
