// ── Dashboard aggregates ──
//
// dashboard_stats is an independently seeded snapshot: it is loaded
// with the document and never recomputed after mutations, so its
// counts can drift from the live entity arrays. Pages that need live
// counts compute them from the arrays instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Device compliance breakdown as percentages of the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceBreakdown {
    pub compliant: u32,
    pub non_compliant: u32,
    pub unknown: u32,
}

/// One point of the 30-day active-user series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub users: u32,
}

/// Pre-aggregated dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_users: u32,
    pub pending_approvals: u32,
    pub critical_incidents: u32,
    pub daily_messages: u64,
    pub device_compliance: ComplianceBreakdown,
    pub user_activity_30d: Vec<ActivityPoint>,
}

/// Per-group daily message volume, used by the reports page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStat {
    pub group_id: String,
    pub date: NaiveDate,
    pub messages: u64,
}
