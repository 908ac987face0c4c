//! Canonical domain types for the admin console document.
//!
//! Every record is a plain data carrier matching the platform's JSON
//! shape on the wire -- behavior lives in the `action` and `query`
//! modules, not here.

mod audit;
mod device;
mod document;
mod group;
mod incident;
mod stats;
mod user;

pub use audit::{Actor, AuditLog, Severity};
pub use device::{Device, DeviceCompliance};
pub use document::AdminData;
pub use group::{Group, GroupType, JoinRequest};
pub use incident::{Incident, IncidentStatus};
pub use stats::{ActivityPoint, ComplianceBreakdown, DashboardStats, MessageStat};
pub use user::{User, UserStatus};
