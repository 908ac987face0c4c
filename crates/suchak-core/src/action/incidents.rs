// ── Incident triage state machine ──
//
// Open -> Investigating -> Resolved, nothing else. Resolved is
// terminal; an attempt to move a resolved incident is a validation
// error, not a silent no-op.

use crate::audit::{ActionContext, AuditDraft, append_entry};
use crate::error::{CoreError, Entity};
use crate::model::{Actor, AdminData, IncidentStatus, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum IncidentTransition {
    /// Open -> Investigating; assigns the actor if unassigned.
    Acknowledge,
    /// Investigating -> Investigating; re-assigns the actor.
    Investigate,
    /// Investigating -> Resolved; keeps the existing assignee.
    Resolve,
}

impl IncidentTransition {
    pub fn past_label(self) -> &'static str {
        match self {
            Self::Acknowledge => "acknowledged",
            Self::Investigate => "investigated",
            Self::Resolve => "resolved",
        }
    }

    fn target(self) -> IncidentStatus {
        match self {
            Self::Acknowledge | Self::Investigate => IncidentStatus::Investigating,
            Self::Resolve => IncidentStatus::Resolved,
        }
    }

    fn accepts(self, from: IncidentStatus) -> bool {
        match self {
            Self::Acknowledge => from == IncidentStatus::Open,
            Self::Investigate | Self::Resolve => from == IncidentStatus::Investigating,
        }
    }
}

fn assignee_name(actor: &Actor) -> String {
    match actor {
        Actor::System => "System".to_string(),
        Actor::Admin { name, .. } => name.clone(),
    }
}

pub(crate) fn transition(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    incident_id: &str,
    transition: IncidentTransition,
) -> Result<AdminData, CoreError> {
    let Some(incident) = data.incident(incident_id) else {
        return Err(CoreError::not_found(Entity::Incident, incident_id));
    };
    if !transition.accepts(incident.status) {
        return Err(CoreError::validation(
            "status",
            format!(
                "cannot {transition} an incident in status {}",
                incident.status
            ),
        ));
    }

    let mut next = data.clone();
    for i in &mut next.incidents {
        if i.id == incident_id {
            i.status = transition.target();
            match transition {
                IncidentTransition::Acknowledge => {
                    if i.assigned_to.is_none() {
                        i.assigned_to = Some(assignee_name(&ctx.actor));
                    }
                }
                IncidentTransition::Investigate => {
                    i.assigned_to = Some(assignee_name(&ctx.actor));
                }
                IncidentTransition::Resolve => {}
            }
        }
    }

    Ok(append_entry(
        next,
        ctx,
        AuditDraft::new(
            format!("Incident {}", transition.past_label()),
            incident_id,
            format!("Incident {} via admin console", transition.past_label()),
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
    fn acknowledge_moves_open_to_investigating_and_assigns() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        // I001 is seeded Open and unassigned.
        let next = transition(&data, &ctx, "I001", IncidentTransition::Acknowledge).unwrap();

        let incident = next.incident("I001").unwrap();
        assert_eq!(incident.status, IncidentStatus::Investigating);
        assert_eq!(incident.assigned_to.as_deref(), Some("Current User"));
        assert_eq!(next.audit_logs[0].action, "Incident acknowledged");
        assert_eq!(next.audit_logs[0].severity, Severity::Info);
    }

    #[test]
    fn acknowledge_keeps_existing_assignee() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        // I002 is seeded Open but already assigned.
        let next = transition(&data, &ctx, "I002", IncidentTransition::Acknowledge).unwrap();
        assert_eq!(
            next.incident("I002").unwrap().assigned_to,
            data.incident("I002").unwrap().assigned_to
        );
    }

    #[test]
    fn resolve_requires_investigating() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        // Straight from Open: rejected.
        assert!(matches!(
            transition(&data, &ctx, "I001", IncidentTransition::Resolve).unwrap_err(),
            CoreError::Validation { .. }
        ));

        // Through the machine: accepted, assignee preserved.
        let next = transition(&data, &ctx, "I001", IncidentTransition::Acknowledge).unwrap();
        let next = transition(&next, &ctx, "I001", IncidentTransition::Resolve).unwrap();
        let incident = next.incident("I001").unwrap();
        assert_eq!(incident.status, IncidentStatus::Resolved);
        assert_eq!(incident.assigned_to.as_deref(), Some("Current User"));
    }

    #[test]
    fn resolved_is_terminal() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        // I003 is seeded Resolved.
        for t in [
            IncidentTransition::Acknowledge,
            IncidentTransition::Investigate,
            IncidentTransition::Resolve,
        ] {
            assert!(matches!(
                transition(&data, &ctx, "I003", t).unwrap_err(),
                CoreError::Validation { .. }
            ));
        }
    }

    #[test]
    fn investigate_reassigns_idempotently() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        let next = transition(&data, &ctx, "I001", IncidentTransition::Acknowledge).unwrap();
        let again = transition(&next, &ctx, "I001", IncidentTransition::Investigate).unwrap();

        let incident = again.incident("I001").unwrap();
        assert_eq!(incident.status, IncidentStatus::Investigating);
        assert_eq!(incident.assigned_to.as_deref(), Some("Current User"));
    }
}
