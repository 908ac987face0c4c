//! List-view filter predicates.
//!
//! Every page filters with a conjunction of independent predicates:
//! a case-insensitive substring search over that page's text fields,
//! optional exact enum matches, and (for the audit page) an inclusive
//! timestamp range. An unset predicate matches everything, so the
//! default filter is the identity. Result order always follows the
//! underlying array.

use chrono::{DateTime, Utc};

use crate::model::{
    AdminData, AuditLog, Device, DeviceCompliance, Group, GroupType, Incident, IncidentStatus,
    Severity, User, UserStatus,
};

/// Case-insensitive substring match across a set of fields. A missing
/// or blank needle matches everything.
fn matches_search<'a>(needle: Option<&str>, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let Some(needle) = needle else { return true };
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|f| f.to_lowercase().contains(&needle))
}

// ── Users ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        matches_search(
            self.search.as_deref(),
            [
                user.name.as_str(),
                user.service_id.as_str(),
                user.email.as_str(),
            ],
        ) && self.status.is_none_or(|s| s == user.status)
    }
}

pub fn filter_users<'a>(data: &'a AdminData, filter: &UserFilter) -> Vec<&'a User> {
    data.users.iter().filter(|u| filter.matches(u)).collect()
}

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub search: Option<String>,
    pub compliance: Option<DeviceCompliance>,
}

impl DeviceFilter {
    /// `owner` is the resolved user record, when the foreign key holds.
    /// The search also covers the owner's name, like the device page.
    pub fn matches(&self, device: &Device, owner: Option<&User>) -> bool {
        matches_search(
            self.search.as_deref(),
            [
                device.device_id.as_str(),
                owner.map_or("", |u| u.name.as_str()),
                device.model.as_str(),
            ],
        ) && self.compliance.is_none_or(|c| c == device.compliance)
    }
}

pub fn filter_devices<'a>(data: &'a AdminData, filter: &DeviceFilter) -> Vec<&'a Device> {
    data.devices
        .iter()
        .filter(|d| filter.matches(d, data.device_owner(d)))
        .collect()
}

// ── Groups ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
    pub search: Option<String>,
    pub group_type: Option<GroupType>,
}

impl GroupFilter {
    pub fn matches(&self, group: &Group) -> bool {
        matches_search(
            self.search.as_deref(),
            [group.name.as_str(), group.group_id.as_str()],
        ) && self.group_type.is_none_or(|t| t == group.group_type)
    }
}

pub fn filter_groups<'a>(data: &'a AdminData, filter: &GroupFilter) -> Vec<&'a Group> {
    data.groups.iter().filter(|g| filter.matches(g)).collect()
}

// ── Incidents ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    pub search: Option<String>,
    pub severity: Option<Severity>,
    pub status: Option<IncidentStatus>,
}

impl IncidentFilter {
    pub fn matches(&self, incident: &Incident) -> bool {
        matches_search(
            self.search.as_deref(),
            [
                incident.summary.as_str(),
                incident.incident_type.as_str(),
                incident.id.as_str(),
            ],
        ) && self.severity.is_none_or(|s| s == incident.severity)
            && self.status.is_none_or(|s| s == incident.status)
    }
}

pub fn filter_incidents<'a>(data: &'a AdminData, filter: &IncidentFilter) -> Vec<&'a Incident> {
    data.incidents
        .iter()
        .filter(|i| filter.matches(i))
        .collect()
}

// ── Audit log ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub search: Option<String>,
    /// Exact actor-string match (the page offers a dropdown, not a
    /// substring search).
    pub actor: Option<String>,
    pub severity: Option<Severity>,
    /// Inclusive lower timestamp bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper timestamp bound.
    pub to: Option<DateTime<Utc>>,
}

impl AuditFilter {
    pub fn matches(&self, log: &AuditLog) -> bool {
        matches_search(
            self.search.as_deref(),
            [
                log.action.as_str(),
                log.target.as_str(),
                log.details.as_str(),
            ],
        ) && self.actor.as_ref().is_none_or(|a| *a == log.actor)
            && self.severity.is_none_or(|s| s == log.severity)
            && self.from.is_none_or(|from| log.timestamp >= from)
            && self.to.is_none_or(|to| log.timestamp <= to)
    }
}

/// Filtered view of the audit log; order stays newest-first because
/// the underlying array already is.
pub fn filter_audit_logs<'a>(data: &'a AdminData, filter: &AuditFilter) -> Vec<&'a AuditLog> {
    data.audit_logs
        .iter()
        .filter(|l| filter.matches(l))
        .collect()
}

/// Distinct actor strings in first-seen order, for the actor dropdown.
pub fn audit_actors(data: &AdminData) -> Vec<String> {
    let mut actors: Vec<String> = Vec::new();
    for log in &data.audit_logs {
        if !actors.iter().any(|a| *a == log.actor) {
            actors.push(log.actor.clone());
        }
    }
    actors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testutil::fixture_document;

    #[test]
    fn default_filter_is_identity() {
        let data = fixture_document();
        assert_eq!(
            filter_users(&data, &UserFilter::default()).len(),
            data.users.len()
        );
        assert_eq!(
            filter_audit_logs(&data, &AuditFilter::default()).len(),
            data.audit_logs.len()
        );
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let data = fixture_document();
        let filter = UserFilter {
            search: Some("RAJ".to_string()),
            status: None,
        };
        let hits = filter_users(&data, &filter);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|u| u.name.to_lowercase().contains("raj")));
    }

    #[test]
    fn combined_filter_equals_intersection() {
        let data = fixture_document();
        let search_only = UserFilter {
            search: Some("a".to_string()),
            status: None,
        };
        let status_only = UserFilter {
            search: None,
            status: Some(UserStatus::Active),
        };
        let both = UserFilter {
            search: Some("a".to_string()),
            status: Some(UserStatus::Active),
        };

        let by_search: Vec<&str> = filter_users(&data, &search_only)
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        let by_status: Vec<&str> = filter_users(&data, &status_only)
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        let combined: Vec<&str> = filter_users(&data, &both)
            .iter()
            .map(|u| u.id.as_str())
            .collect();

        let intersection: Vec<&str> = by_search
            .iter()
            .copied()
            .filter(|id| by_status.contains(id))
            .collect();
        assert_eq!(combined, intersection);
    }

    #[test]
    fn device_search_reaches_owner_name() {
        let data = fixture_document();
        let owner_name = data.users[0].name.clone();
        let filter = DeviceFilter {
            search: Some(owner_name),
            compliance: None,
        };
        let hits = filter_devices(&data, &filter);
        assert!(hits.iter().any(|d| d.user_id == data.users[0].id));
    }

    #[test]
    fn orphaned_device_owner_is_tolerated() {
        let data = fixture_document();
        // D003's user_id points nowhere; filtering must not panic and
        // the device still matches on its own fields.
        let filter = DeviceFilter {
            search: Some("D003".to_string()),
            compliance: None,
        };
        assert_eq!(filter_devices(&data, &filter).len(), 1);
    }

    #[test]
    fn audit_date_range_is_inclusive() {
        let data = fixture_document();
        let ts = data.audit_logs[0].timestamp;
        let filter = AuditFilter {
            from: Some(ts),
            to: Some(ts),
            ..AuditFilter::default()
        };
        let hits = filter_audit_logs(&data, &filter);
        assert!(hits.iter().any(|l| l.timestamp == ts));
        assert!(hits.iter().all(|l| l.timestamp == ts));
    }

    #[test]
    fn actor_filter_is_exact() {
        let data = fixture_document();
        let filter = AuditFilter {
            actor: Some("System".to_string()),
            ..AuditFilter::default()
        };
        assert!(
            filter_audit_logs(&data, &filter)
                .iter()
                .all(|l| l.actor == "System")
        );
    }

    #[test]
    fn audit_actors_deduplicates_in_order() {
        let data = fixture_document();
        let actors = audit_actors(&data);
        let mut sorted = actors.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(actors.len(), sorted.len());
    }
}
