// ── Group membership actions ──

use crate::audit::{ActionContext, AuditDraft, append_entry};
use crate::error::{CoreError, Entity};
use crate::model::{AdminData, Group, GroupType, Severity};

/// Create a group with the acting admin as its first member.
pub(crate) fn create_group(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    name: &str,
    group_type: GroupType,
) -> Result<AdminData, CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("name", "group name is empty"));
    }

    let group = Group {
        group_id: ctx.ids.group_id(),
        name: name.to_string(),
        group_type,
        members: 1,
        pending_requests: Vec::new(),
        activity: 0,
        created_at: ctx.now,
    };
    let group_id = group.group_id.clone();

    let mut next = data.clone();
    next.groups.insert(0, group);

    Ok(append_entry(
        next,
        ctx,
        AuditDraft::new(
            "Group Created",
            group_id,
            format!("New {group_type} group \"{name}\" created"),
            Severity::Info,
        ),
    ))
}

/// Approve or reject a pending join request. Either way the request
/// leaves the queue; only approval bumps the member count.
pub(crate) fn resolve_join_request(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    group_id: &str,
    user_id: &str,
    approve: bool,
) -> Result<AdminData, CoreError> {
    let Some(group) = data.group(group_id) else {
        return Err(CoreError::not_found(Entity::Group, group_id));
    };
    if group.pending_request(user_id).is_none() {
        return Err(CoreError::validation(
            "user_id",
            format!("no pending join request from {user_id} in {group_id}"),
        ));
    }

    let mut next = data.clone();
    for g in &mut next.groups {
        if g.group_id == group_id {
            g.pending_requests.retain(|r| r.user_id != user_id);
            if approve {
                g.members += 1;
            }
        }
    }

    let verdict = if approve { "Approved" } else { "Rejected" };
    Ok(append_entry(
        next,
        ctx,
        AuditDraft::new(
            format!("Group Join Request {verdict}"),
            format!("{group_id}:{user_id}"),
            format!(
                "Join request {} for user {user_id}",
                verdict.to_lowercase()
            ),
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
    fn create_prepends_group_with_creator_membership() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let groups_before = data.groups.len();

        let next = create_group(&data, &ctx, "Night Watch", GroupType::Operational).unwrap();

        assert_eq!(next.groups.len(), groups_before + 1);
        let group = &next.groups[0];
        assert_eq!(group.name, "Night Watch");
        assert_eq!(group.members, 1);
        assert!(group.pending_requests.is_empty());
        assert_eq!(group.activity, 0);
        assert_eq!(next.audit_logs[0].action, "Group Created");
        assert_eq!(next.audit_logs[0].target, group.group_id);
    }

    #[test]
    fn create_rejects_blank_name() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        assert!(matches!(
            create_group(&data, &ctx, "   ", GroupType::Family).unwrap_err(),
            CoreError::Validation { .. }
        ));
    }

    #[test]
    fn approving_request_drains_queue_and_bumps_members() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let before = data.group("G001").unwrap();
        let members_before = before.members;
        assert!(before.pending_request("U003").is_some());

        let next = resolve_join_request(&data, &ctx, "G001", "U003", true).unwrap();

        let group = next.group("G001").unwrap();
        assert!(group.pending_request("U003").is_none());
        assert_eq!(group.members, members_before + 1);
        assert_eq!(next.audit_logs[0].action, "Group Join Request Approved");
        assert_eq!(next.audit_logs[0].target, "G001:U003");
    }

    #[test]
    fn rejecting_request_drains_queue_only() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let members_before = data.group("G001").unwrap().members;

        let next = resolve_join_request(&data, &ctx, "G001", "U003", false).unwrap();

        let group = next.group("G001").unwrap();
        assert!(group.pending_request("U003").is_none());
        assert_eq!(group.members, members_before);
        assert_eq!(next.audit_logs[0].action, "Group Join Request Rejected");
    }

    #[test]
    fn missing_group_or_request_is_an_error() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        assert!(matches!(
            resolve_join_request(&data, &ctx, "G999", "U003", true).unwrap_err(),
            CoreError::NotFound { .. }
        ));
        assert!(matches!(
            resolve_join_request(&data, &ctx, "G001", "U999", true).unwrap_err(),
            CoreError::Validation { .. }
        ));
    }
}
