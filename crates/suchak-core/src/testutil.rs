// Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, TimeZone, Utc};

use crate::access::Role;
use crate::audit::{ActionContext, IdGenerator};
use crate::model::{
    ActivityPoint, Actor, AdminData, AuditLog, ComplianceBreakdown, DashboardStats, Device,
    DeviceCompliance, Group, GroupType, Incident, IncidentStatus, JoinRequest, MessageStat,
    Severity, User, UserStatus,
};

fn ts(y: i32, m: u32, d: u32, h: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn user(id: &str, name: &str, status: UserStatus, device_id: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        role: "Field Officer".to_string(),
        service_id: format!("SVC-{id}"),
        email: format!("{}@suchak.example", id.to_lowercase()),
        phone: "+91-98000-00000".to_string(),
        status,
        last_login: Some(ts(2025, 7, 30, 9)),
        device_id: device_id.map(str::to_string),
        verified: true,
        joined_at: ts(2024, 11, 2, 10),
        groups: 2,
    }
}

fn device(device_id: &str, user_id: &str, compliance: DeviceCompliance) -> Device {
    Device {
        device_id: device_id.to_string(),
        user_id: user_id.to_string(),
        model: "Shakti X1".to_string(),
        os: "Android 14".to_string(),
        compliance,
        attested_at: ts(2025, 7, 28, 6),
        ip: "10.20.30.40".parse().unwrap(),
        safety_score: 91,
    }
}

/// A small but fully cross-linked document: one entity in every state
/// the actions care about, plus one deliberately orphaned foreign key.
pub(crate) fn fixture_document() -> AdminData {
    AdminData {
        users: vec![
            user("U001", "Rajesh Kumar", UserStatus::Active, Some("D001")),
            user("U002", "Asha Rao", UserStatus::Pending, Some("D002")),
            user("U003", "Vikram Singh", UserStatus::Suspended, None),
        ],
        devices: vec![
            device("D001", "U001", DeviceCompliance::Compliant),
            device("D002", "U002", DeviceCompliance::Rooted),
            // Orphaned owner on purpose.
            device("D003", "U404", DeviceCompliance::Unknown),
        ],
        groups: vec![
            Group {
                group_id: "G001".to_string(),
                name: "Northern Command".to_string(),
                group_type: GroupType::Operational,
                members: 24,
                pending_requests: vec![JoinRequest {
                    user_id: "U003".to_string(),
                    user_name: "Vikram Singh".to_string(),
                    requested_at: ts(2025, 7, 29, 14),
                    reason: "Transferred to northern sector".to_string(),
                }],
                activity: 1340,
                created_at: ts(2024, 6, 1, 8),
            },
            Group {
                group_id: "G002".to_string(),
                name: "Families Net".to_string(),
                group_type: GroupType::Family,
                members: 58,
                pending_requests: Vec::new(),
                activity: 422,
                created_at: ts(2024, 9, 15, 12),
            },
        ],
        incidents: vec![
            Incident {
                id: "I001".to_string(),
                incident_type: "Failed Login Burst".to_string(),
                severity: Severity::Warning,
                timestamp: ts(2025, 7, 31, 22),
                user_id: "U001".to_string(),
                status: IncidentStatus::Open,
                summary: "Repeated failed logins".to_string(),
                description: "Five failed login attempts within two minutes".to_string(),
                assigned_to: None,
            },
            Incident {
                id: "I002".to_string(),
                incident_type: "Policy Violation".to_string(),
                severity: Severity::Info,
                timestamp: ts(2025, 7, 31, 23),
                user_id: "U404".to_string(),
                status: IncidentStatus::Open,
                summary: "Screenshot attempt blocked".to_string(),
                description: "Client blocked a screenshot in a protected view".to_string(),
                assigned_to: Some("Asha Rao".to_string()),
            },
            Incident {
                id: "I003".to_string(),
                incident_type: "Device Action".to_string(),
                severity: Severity::Critical,
                timestamp: ts(2025, 7, 30, 5),
                user_id: "U002".to_string(),
                status: IncidentStatus::Resolved,
                summary: "Rooted device detected".to_string(),
                description: "Attestation flagged a rooted handset".to_string(),
                assigned_to: Some("Rajesh Kumar".to_string()),
            },
            Incident {
                id: "I004".to_string(),
                incident_type: "Network Anomaly".to_string(),
                severity: Severity::Warning,
                timestamp: ts(2025, 7, 30, 11),
                user_id: "U003".to_string(),
                status: IncidentStatus::Investigating,
                summary: "Unusual relay traffic".to_string(),
                description: "Relay volume spiked outside duty hours".to_string(),
                assigned_to: Some("Asha Rao".to_string()),
            },
        ],
        messages_stats: vec![
            MessageStat {
                group_id: "G001".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
                messages: 210,
            },
            MessageStat {
                group_id: "G002".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
                messages: 75,
            },
        ],
        audit_logs: vec![
            AuditLog {
                id: "A002".to_string(),
                actor: "Super Admin:Meera Nair".to_string(),
                action: "User approved".to_string(),
                target: "U001".to_string(),
                timestamp: ts(2025, 7, 31, 16),
                details: "User approved via admin console".to_string(),
                severity: Severity::Info,
            },
            AuditLog {
                id: "A001".to_string(),
                actor: "System".to_string(),
                action: "Device Attestation Rerun".to_string(),
                target: "D002".to_string(),
                timestamp: ts(2025, 7, 30, 6),
                details: "Scheduled attestation sweep".to_string(),
                severity: Severity::Warning,
            },
        ],
        dashboard_stats: DashboardStats {
            active_users: 2,
            pending_approvals: 1,
            critical_incidents: 1,
            daily_messages: 285,
            device_compliance: ComplianceBreakdown {
                compliant: 62,
                non_compliant: 25,
                unknown: 13,
            },
            user_activity_30d: vec![
                ActivityPoint {
                    date: NaiveDate::from_ymd_opt(2025, 7, 29).unwrap(),
                    users: 118,
                },
                ActivityPoint {
                    date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
                    users: 131,
                },
                ActivityPoint {
                    date: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
                    users: 127,
                },
            ],
        },
    }
}

/// A Super Admin context with a fixed operator name.
pub(crate) fn test_context(ids: &IdGenerator) -> ActionContext<'_> {
    ActionContext {
        actor: Actor::admin(Role::SuperAdmin, "Current User"),
        now: Utc::now(),
        ids,
    }
}
