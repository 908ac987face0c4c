//! Mutating console actions.
//!
//! Every operation is a pure document transform: `(document, context,
//! params) -> new document`. The input document is never touched; the
//! caller commits the returned replacement through the store. Each
//! transform also prepends the matching audit entry, so a single
//! commit carries both the entity change and its trail.

mod devices;
mod groups;
mod incidents;
mod settings;
mod users;

pub use devices::sample_safety_score;
pub use incidents::IncidentTransition;
pub use settings::{emergency_broadcast, update_setting};
pub use users::UserTransition;

use rand::Rng;

use crate::audit::ActionContext;
use crate::error::CoreError;
use crate::model::{AdminData, GroupType};

/// Priority of an emergency broadcast, mapped onto audit severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BroadcastPriority {
    High,
    Critical,
}

/// A typed mutation request against the document.
#[derive(Debug, Clone)]
pub enum Action {
    /// Move a single user to the transition's target status.
    UserStatus {
        user_id: String,
        transition: UserTransition,
    },
    /// Apply one status transition to a selection of users in a single
    /// commit, with a single audit entry.
    BulkUserStatus {
        user_ids: Vec<String>,
        transition: UserTransition,
    },
    /// Flip a device's compliance and open a Warning incident.
    ToggleQuarantine { device_id: String },
    /// Refresh a device's attestation timestamp and safety score.
    RerunAttestation { device_id: String },
    /// Create a new group with the actor as first member.
    CreateGroup {
        name: String,
        group_type: GroupType,
    },
    /// Approve or reject a pending join request.
    ResolveJoinRequest {
        group_id: String,
        user_id: String,
        approve: bool,
    },
    /// Drive the incident state machine.
    Incident {
        incident_id: String,
        transition: IncidentTransition,
    },
    /// Audit-only: record an emergency broadcast to all users.
    EmergencyBroadcast {
        message: String,
        priority: BroadcastPriority,
    },
}

/// Apply an action to the document, returning the replacement.
///
/// `rng` feeds attestation score sampling and is untouched by every
/// other action.
pub fn apply<R: Rng>(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    action: &Action,
    rng: &mut R,
) -> Result<AdminData, CoreError> {
    match action {
        Action::UserStatus {
            user_id,
            transition,
        } => users::set_status(data, ctx, user_id, *transition),
        Action::BulkUserStatus {
            user_ids,
            transition,
        } => users::bulk_set_status(data, ctx, user_ids, *transition),
        Action::ToggleQuarantine { device_id } => devices::toggle_quarantine(data, ctx, device_id),
        Action::RerunAttestation { device_id } => {
            devices::rerun_attestation(data, ctx, device_id, rng)
        }
        Action::CreateGroup { name, group_type } => {
            groups::create_group(data, ctx, name, *group_type)
        }
        Action::ResolveJoinRequest {
            group_id,
            user_id,
            approve,
        } => groups::resolve_join_request(data, ctx, group_id, user_id, *approve),
        Action::Incident {
            incident_id,
            transition,
        } => incidents::transition(data, ctx, incident_id, *transition),
        Action::EmergencyBroadcast { message, priority } => {
            settings::emergency_broadcast(data, ctx, message, *priority)
        }
    }
}
