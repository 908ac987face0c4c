//! State layer for the SUCHAK admin console.
//!
//! This crate owns the console's entire logical contract; the binary
//! on top of it is presentation only:
//!
//! - **[`Session`]** — Owning facade for one signed-in console:
//!   document store, role, operator identity, id sequence, platform
//!   settings. [`Session::apply`] runs a mutating action against a
//!   fresh snapshot and commits the replacement document.
//!
//! - **[`Store`]** — A versioned cell holding the current
//!   [`AdminData`] snapshot. Mutations are whole-document
//!   replacements committed with compare-and-swap, so concurrent
//!   actions serialize instead of overwriting each other.
//!
//! - **[`Action`]** — Typed mutation requests (user lifecycle, device
//!   quarantine and attestation, group membership, incident triage,
//!   broadcasts). Every action is a pure `(document, params) -> new
//!   document` transform that also prepends its audit entry.
//!
//! - **Domain model** ([`model`]) — Plain records matching the
//!   platform's JSON document shape, with advisory foreign keys.
//!
//! - **Queries** ([`query`], [`page`], [`reports`]) — Conjunctive
//!   filter predicates per list view, fixed-size audit pagination,
//!   and report row builders.
//!
//! - **[`access`]** — The closed role set and its capability/page
//!   visibility tables.

pub mod access;
pub mod action;
pub mod audit;
pub mod error;
pub mod export;
pub mod model;
pub mod page;
pub mod query;
pub mod reports;
pub mod session;
pub mod settings;
pub mod store;

#[cfg(test)]
mod testutil;

// ── Primary re-exports ──────────────────────────────────────────────
pub use access::{Capabilities, Destination, Role};
pub use action::{Action, BroadcastPriority, IncidentTransition, UserTransition};
pub use audit::{ActionContext, AuditDraft, IdGenerator};
pub use error::{CoreError, Entity};
pub use session::Session;
pub use settings::{SettingChange, SystemSettings};
pub use store::{Snapshot, Store};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ActivityPoint,
    Actor,
    AdminData,
    AuditLog,
    ComplianceBreakdown,
    DashboardStats,
    Device,
    DeviceCompliance,
    Group,
    GroupType,
    Incident,
    IncidentStatus,
    JoinRequest,
    MessageStat,
    Severity,
    User,
    UserStatus,
};
