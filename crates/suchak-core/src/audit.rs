//! Audit-log append helper and session-scoped id synthesis.
//!
//! Every mutating action funnels through [`append_entry`]: synthesize
//! an id and timestamp for the draft, prepend it to `audit_logs`, and
//! hand back the replacement document. Ids come from a monotonic
//! per-session sequence, so rapid successive appends can never collide
//! the way clock-derived ids can.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::model::{Actor, AdminData, AuditLog, Severity};

/// Seed for synthesized record numbers, clear of seeded-document ids.
const ID_SEQUENCE_START: u64 = 1000;

/// Monotonic id source shared by audit entries, incidents, and groups
/// created during a session.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(ID_SEQUENCE_START)
    }

    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn audit_id(&self) -> String {
        format!("A{}", self.next())
    }

    pub fn incident_id(&self) -> String {
        format!("I{}", self.next())
    }

    pub fn group_id(&self) -> String {
        format!("G{}", self.next())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Ambient inputs shared by every document transform: who is acting,
/// when, and where synthesized ids come from.
#[derive(Debug)]
pub struct ActionContext<'a> {
    pub actor: Actor,
    pub now: DateTime<Utc>,
    pub ids: &'a IdGenerator,
}

impl ActionContext<'_> {
    /// The actor string recorded on audit entries.
    pub fn actor_label(&self) -> String {
        self.actor.to_string()
    }
}

/// An audit entry before id/timestamp synthesis.
#[derive(Debug, Clone)]
pub struct AuditDraft {
    pub action: String,
    pub target: String,
    pub details: String,
    pub severity: Severity,
}

impl AuditDraft {
    pub fn new(
        action: impl Into<String>,
        target: impl Into<String>,
        details: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            action: action.into(),
            target: target.into(),
            details: details.into(),
            severity,
        }
    }
}

/// Prepend a synthesized entry to the document's audit log.
///
/// The draft's actor defaults to the context actor; pass
/// [`Actor::System`] through `actor_override` for automated actions.
pub fn append_entry(mut data: AdminData, ctx: &ActionContext<'_>, draft: AuditDraft) -> AdminData {
    let actor = ctx.actor.clone();
    append_entry_as(&mut data, ctx, &actor, draft);
    data
}

/// Prepend an entry attributed to an explicit actor.
pub fn append_entry_as(
    data: &mut AdminData,
    ctx: &ActionContext<'_>,
    actor: &Actor,
    draft: AuditDraft,
) {
    let entry = AuditLog {
        id: ctx.ids.audit_id(),
        actor: actor.to_string(),
        action: draft.action,
        target: draft.target,
        timestamp: ctx.now,
        details: draft.details,
        severity: draft.severity,
    };
    data.audit_logs.insert(0, entry);
}
