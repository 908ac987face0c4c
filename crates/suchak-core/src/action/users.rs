// ── User lifecycle transitions ──

use crate::audit::{ActionContext, AuditDraft, append_entry};
use crate::error::{CoreError, Entity};
use crate::model::{AdminData, Severity, UserStatus};

/// The three explicit user status actions. Approve and activate both
/// land on Active; they are kept distinct because they apply to
/// different starting states and carry different audit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum UserTransition {
    Approve,
    Suspend,
    Activate,
}

impl UserTransition {
    pub fn target(self) -> UserStatus {
        match self {
            Self::Approve | Self::Activate => UserStatus::Active,
            Self::Suspend => UserStatus::Suspended,
        }
    }

    /// Past-tense label used in audit entries.
    pub fn past_label(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Suspend => "suspended",
            Self::Activate => "activated",
        }
    }
}

pub(crate) fn set_status(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    user_id: &str,
    transition: UserTransition,
) -> Result<AdminData, CoreError> {
    if data.user(user_id).is_none() {
        return Err(CoreError::not_found(Entity::User, user_id));
    }

    let mut next = data.clone();
    for user in &mut next.users {
        if user.id == user_id {
            user.status = transition.target();
        }
    }

    Ok(append_entry(
        next,
        ctx,
        AuditDraft::new(
            format!("User {}", transition.past_label()),
            user_id,
            format!("User {} via admin console", transition.past_label()),
            Severity::Info,
        ),
    ))
}

pub(crate) fn bulk_set_status(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    user_ids: &[String],
    transition: UserTransition,
) -> Result<AdminData, CoreError> {
    if user_ids.is_empty() {
        return Err(CoreError::validation("user_ids", "selection is empty"));
    }

    let mut next = data.clone();
    let mut touched = 0u32;
    for user in &mut next.users {
        if user_ids.contains(&user.id) {
            user.status = transition.target();
            touched += 1;
        }
    }

    Ok(append_entry(
        next,
        ctx,
        AuditDraft::new(
            format!("Bulk {transition}"),
            format!("{touched} users"),
            format!("Bulk {transition} operation on selected users"),
            Severity::Info,
        ),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testutil::{fixture_document, test_context};

    #[test]
    fn approve_sets_active_and_audits_once() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let log_len = data.audit_logs.len();

        let next = set_status(&data, &ctx, "U002", UserTransition::Approve).unwrap();

        assert_eq!(next.user("U002").unwrap().status, UserStatus::Active);
        assert_eq!(next.audit_logs.len(), log_len + 1);
        assert_eq!(next.audit_logs[0].action, "User approved");
        assert_eq!(next.audit_logs[0].severity, Severity::Info);
        // The input document is untouched.
        assert_eq!(data.user("U002").unwrap().status, UserStatus::Pending);
        assert_eq!(data.audit_logs.len(), log_len);
    }

    #[test]
    fn suspend_and_activate_round_trip() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        let next = set_status(&data, &ctx, "U001", UserTransition::Suspend).unwrap();
        assert_eq!(next.user("U001").unwrap().status, UserStatus::Suspended);

        let next = set_status(&next, &ctx, "U001", UserTransition::Activate).unwrap();
        assert_eq!(next.user("U001").unwrap().status, UserStatus::Active);
        assert_eq!(next.audit_logs[0].action, "User activated");
    }

    #[test]
    fn unknown_user_is_a_lookup_error() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        let err = set_status(&data, &ctx, "U999", UserTransition::Approve).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn bulk_applies_one_commit_one_entry() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let log_len = data.audit_logs.len();

        let selection = vec!["U001".to_string(), "U002".to_string(), "U404".to_string()];
        let next = bulk_set_status(&data, &ctx, &selection, UserTransition::Suspend).unwrap();

        assert_eq!(next.user("U001").unwrap().status, UserStatus::Suspended);
        assert_eq!(next.user("U002").unwrap().status, UserStatus::Suspended);
        assert_eq!(next.audit_logs.len(), log_len + 1);
        assert_eq!(next.audit_logs[0].action, "Bulk suspend");
        // Unknown ids are skipped, not errors; the target reflects the touched count.
        assert_eq!(next.audit_logs[0].target, "2 users");
    }

    #[test]
    fn bulk_rejects_empty_selection() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        let err = bulk_set_status(&data, &ctx, &[], UserTransition::Approve).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }
}
