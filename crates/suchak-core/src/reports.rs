//! Report builders for the Reports page.
//!
//! Each builder flattens the document into uniform rows that render
//! through the standard output formats and feed straight into the CSV
//! exporter. The compliance and activity series intentionally read the
//! seeded `dashboard_stats` snapshot; the overview mixes that snapshot
//! with live counts exactly where the console always has.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{AdminData, IncidentStatus, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewRow {
    pub metric: String,
    pub value: u64,
}

/// Headline metrics: live entity counts alongside the seeded
/// active-user figure.
pub fn overview(data: &AdminData) -> Vec<OverviewRow> {
    let open_incidents = data
        .incidents
        .iter()
        .filter(|i| i.status == IncidentStatus::Open)
        .count();
    vec![
        OverviewRow {
            metric: "Total Users".to_string(),
            value: data.users.len() as u64,
        },
        OverviewRow {
            metric: "Active Users".to_string(),
            value: u64::from(data.dashboard_stats.active_users),
        },
        OverviewRow {
            metric: "Total Devices".to_string(),
            value: data.devices.len() as u64,
        },
        OverviewRow {
            metric: "Total Groups".to_string(),
            value: data.groups.len() as u64,
        },
        OverviewRow {
            metric: "Open Incidents".to_string(),
            value: open_incidents as u64,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserActivityRow {
    pub date: NaiveDate,
    pub users: u32,
}

/// The 30-day active-user series from the dashboard snapshot.
pub fn user_activity(data: &AdminData) -> Vec<UserActivityRow> {
    data.dashboard_stats
        .user_activity_30d
        .iter()
        .map(|p| UserActivityRow {
            date: p.date,
            users: p.users,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupActivityRow {
    pub name: String,
    pub messages: u64,
    pub members: u32,
}

pub fn group_activity(data: &AdminData) -> Vec<GroupActivityRow> {
    data.groups
        .iter()
        .map(|g| GroupActivityRow {
            name: g.name.clone(),
            messages: g.activity,
            members: g.members,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceRow {
    pub name: String,
    pub value: u32,
}

/// Fleet compliance breakdown from the dashboard snapshot.
pub fn compliance(data: &AdminData) -> Vec<ComplianceRow> {
    let breakdown = &data.dashboard_stats.device_compliance;
    vec![
        ComplianceRow {
            name: "Compliant".to_string(),
            value: breakdown.compliant,
        },
        ComplianceRow {
            name: "Non-Compliant".to_string(),
            value: breakdown.non_compliant,
        },
        ComplianceRow {
            name: "Unknown".to_string(),
            value: breakdown.unknown,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncidentTrendRow {
    pub date: NaiveDate,
    pub critical: u32,
    pub warning: u32,
    pub info: u32,
    pub total: u32,
}

/// Incident counts bucketed by calendar date, one severity per
/// column. Buckets appear in first-seen order over the incident array.
pub fn incident_trend(data: &AdminData) -> Vec<IncidentTrendRow> {
    let mut rows: Vec<IncidentTrendRow> = Vec::new();
    for incident in &data.incidents {
        let date = incident.timestamp.date_naive();
        let idx = rows.iter().position(|r| r.date == date).unwrap_or_else(|| {
            rows.push(IncidentTrendRow {
                date,
                critical: 0,
                warning: 0,
                info: 0,
                total: 0,
            });
            rows.len() - 1
        });
        let Some(row) = rows.get_mut(idx) else {
            continue;
        };
        match incident.severity {
            Severity::Critical => row.critical += 1,
            Severity::Warning => row.warning += 1,
            Severity::Info => row.info += 1,
        }
        row.total += 1;
    }
    rows
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testutil::fixture_document;

    #[test]
    fn overview_mixes_live_and_seeded_counts() {
        let data = fixture_document();
        let rows = overview(&data);
        assert_eq!(rows[0].metric, "Total Users");
        assert_eq!(rows[0].value, data.users.len() as u64);
        assert_eq!(
            rows[1].value,
            u64::from(data.dashboard_stats.active_users)
        );
    }

    #[test]
    fn incident_trend_buckets_by_date() {
        let data = fixture_document();
        let rows = incident_trend(&data);
        let total: u32 = rows.iter().map(|r| r.total).sum();
        assert_eq!(total as usize, data.incidents.len());
        for row in &rows {
            assert_eq!(row.total, row.critical + row.warning + row.info);
        }
    }

    #[test]
    fn group_activity_covers_every_group() {
        let data = fixture_document();
        assert_eq!(group_activity(&data).len(), data.groups.len());
    }

    #[test]
    fn compliance_has_three_segments() {
        let data = fixture_document();
        let rows = compliance(&data);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Compliant");
    }
}
