//! Dashboard command handler.
//!
//! The aggregate card values come from the seeded dashboard snapshot;
//! the entity counts next to them are live. The two can disagree after
//! mutations -- the snapshot is not recomputed.

use suchak_core::{IncidentStatus, Session, Severity};

use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

pub fn handle(session: &Session, resolved: &Resolved) -> Result<(), CliError> {
    let snapshot = session.snapshot();
    let data = &snapshot.data;
    let stats = &data.dashboard_stats;

    let open_incidents = data
        .incidents
        .iter()
        .filter(|i| i.status == IncidentStatus::Open)
        .count();
    let critical_open = data
        .incidents
        .iter()
        .filter(|i| i.severity == Severity::Critical && i.status != IncidentStatus::Resolved)
        .count();

    let mut lines = vec![
        format!("Signed in as:      {}", session.role()),
        String::new(),
        format!("Active Users:      {}", stats.active_users),
        format!("Pending Approvals: {}", stats.pending_approvals),
        format!("Critical Incidents:{:>4}", stats.critical_incidents),
        format!("Daily Messages:    {}", stats.daily_messages),
        String::new(),
        format!(
            "Device Compliance: {}% compliant / {}% non-compliant / {}% unknown",
            stats.device_compliance.compliant,
            stats.device_compliance.non_compliant,
            stats.device_compliance.unknown
        ),
        String::new(),
        format!(
            "Live counts: {} users, {} devices, {} groups, {} open incidents ({} critical)",
            data.users.len(),
            data.devices.len(),
            data.groups.len(),
            open_incidents,
            critical_open
        ),
    ];

    if let Some(latest) = stats.user_activity_30d.last() {
        lines.push(format!(
            "Latest activity:   {} active users on {}",
            latest.users, latest.date
        ));
    }

    let recent: Vec<String> = data
        .audit_logs
        .iter()
        .take(5)
        .map(|l| format!("  {}  {}  {}", l.timestamp.format("%m-%d %H:%M"), l.actor, l.action))
        .collect();
    if !recent.is_empty() {
        lines.push(String::new());
        lines.push("Recent Activity".to_string());
        lines.extend(recent);
    }

    let out = output::render_single(
        &resolved.output,
        stats,
        |_| lines.join("\n"),
        |_| "dashboard".to_string(),
    );
    output::print_output(&out, resolved.quiet);
    Ok(())
}
