// ── Settings-page actions ──
//
// Settings edits mutate console-session state (see
// `crate::settings`); only their audit trail touches the document.
// Emergency broadcast is audit-only end to end: there is no delivery
// channel behind it.

use crate::audit::{ActionContext, AuditDraft, append_entry};
use crate::error::CoreError;
use crate::model::{AdminData, Severity};
use crate::settings::SettingChange;

use super::BroadcastPriority;

impl BroadcastPriority {
    fn severity(self) -> Severity {
        match self {
            Self::High => Severity::Warning,
            Self::Critical => Severity::Critical,
        }
    }
}

/// Record a validated settings edit in the audit trail.
pub fn update_setting(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    change: &SettingChange,
) -> AdminData {
    append_entry(
        data.clone(),
        ctx,
        AuditDraft::new(
            "Setting Updated",
            change.key,
            format!("Setting \"{}\" changed to \"{}\"", change.key, change.value),
            Severity::Info,
        ),
    )
}

/// Record an emergency broadcast to all users.
pub fn emergency_broadcast(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    message: &str,
    priority: BroadcastPriority,
) -> Result<AdminData, CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::validation("message", "broadcast message is empty"));
    }

    Ok(append_entry(
        data.clone(),
        ctx,
        AuditDraft::new(
            "Emergency Broadcast Sent",
            "All Users",
            format!("Emergency broadcast sent with {priority} priority: \"{message}\""),
            priority.severity(),
        ),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::settings::SystemSettings;
    use crate::testutil::{fixture_document, test_context};

    #[test]
    fn setting_change_is_audited_info() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        let mut settings = SystemSettings::default();
        let change = settings.set("enable_mfa", "false").unwrap();
        let next = update_setting(&data, &ctx, &change);

        assert_eq!(next.audit_logs[0].action, "Setting Updated");
        assert_eq!(next.audit_logs[0].target, "enable_mfa");
        assert_eq!(next.audit_logs[0].severity, Severity::Info);
    }

    #[test]
    fn broadcast_severity_follows_priority() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        let next =
            emergency_broadcast(&data, &ctx, "Evacuate sector 4", BroadcastPriority::Critical)
                .unwrap();
        assert_eq!(next.audit_logs[0].severity, Severity::Critical);
        assert_eq!(next.audit_logs[0].target, "All Users");

        let next =
            emergency_broadcast(&data, &ctx, "Patch your handsets", BroadcastPriority::High)
                .unwrap();
        assert_eq!(next.audit_logs[0].severity, Severity::Warning);
    }

    #[test]
    fn broadcast_requires_a_message() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        assert!(matches!(
            emergency_broadcast(&data, &ctx, "  ", BroadcastPriority::High).unwrap_err(),
            CoreError::Validation { .. }
        ));
    }
}
