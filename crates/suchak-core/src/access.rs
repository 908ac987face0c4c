//! Console roles and the page/action visibility gate.
//!
//! This is advisory gating for the console surface: the process
//! boundary is the trust boundary, and there is no server-side
//! enforcement behind it.

use serde::{Deserialize, Serialize};

/// Console role, chosen at login. A closed set -- membership checks go
/// through [`Capabilities`] and the destination table, never through
/// string comparison.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[serde(rename = "Super Admin")]
    #[strum(to_string = "Super Admin", serialize = "super-admin")]
    SuperAdmin,
    #[serde(rename = "Group Admin")]
    #[strum(to_string = "Group Admin", serialize = "group-admin")]
    GroupAdmin,
    #[strum(to_string = "Auditor", serialize = "auditor")]
    Auditor,
}

/// What a role is allowed to do, looked up once instead of scattered
/// role comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// May invoke mutating actions (approve, quarantine, resolve, ...).
    pub can_mutate: bool,
    /// May open the Settings page at all.
    pub can_access_settings: bool,
}

/// A navigable console page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Destination {
    Dashboard,
    #[strum(to_string = "User Management")]
    Users,
    #[strum(to_string = "Device Management")]
    Devices,
    #[strum(to_string = "Group Management")]
    Groups,
    #[strum(to_string = "Audit Logs")]
    AuditLogs,
    #[strum(to_string = "Incidents & Alerts")]
    Incidents,
    Reports,
    Settings,
}

impl Destination {
    /// Roles allowed to open this page.
    fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Dashboard | Self::Reports => {
                &[Role::SuperAdmin, Role::GroupAdmin, Role::Auditor]
            }
            Self::Users | Self::Devices | Self::Groups | Self::Incidents => {
                &[Role::SuperAdmin, Role::GroupAdmin]
            }
            Self::AuditLogs => &[Role::SuperAdmin, Role::Auditor],
            Self::Settings => &[Role::SuperAdmin],
        }
    }
}

impl Role {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::SuperAdmin => Capabilities {
                can_mutate: true,
                can_access_settings: true,
            },
            Self::GroupAdmin => Capabilities {
                can_mutate: true,
                can_access_settings: false,
            },
            Self::Auditor => Capabilities {
                can_mutate: false,
                can_access_settings: false,
            },
        }
    }

    /// Whether this role may open the given page.
    pub fn can_view(self, destination: Destination) -> bool {
        destination.allowed_roles().contains(&self)
    }

    /// The navigation entries visible to this role, in sidebar order.
    pub fn visible_destinations(self) -> Vec<Destination> {
        use strum::IntoEnumIterator;
        Destination::iter().filter(|d| self.can_view(*d)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn super_admin_sees_everything() {
        use strum::IntoEnumIterator;
        assert_eq!(
            Role::SuperAdmin.visible_destinations().len(),
            Destination::iter().count()
        );
    }

    #[test]
    fn auditor_is_read_only() {
        let caps = Role::Auditor.capabilities();
        assert!(!caps.can_mutate);
        assert!(!caps.can_access_settings);
        assert_eq!(
            Role::Auditor.visible_destinations(),
            vec![
                Destination::Dashboard,
                Destination::AuditLogs,
                Destination::Reports
            ]
        );
    }

    #[test]
    fn group_admin_manages_but_no_settings_or_audit() {
        assert!(Role::GroupAdmin.capabilities().can_mutate);
        assert!(!Role::GroupAdmin.can_view(Destination::Settings));
        assert!(!Role::GroupAdmin.can_view(Destination::AuditLogs));
        assert!(Role::GroupAdmin.can_view(Destination::Incidents));
    }

    #[test]
    fn settings_locked_to_super_admin() {
        assert!(Role::SuperAdmin.can_view(Destination::Settings));
        assert!(!Role::GroupAdmin.can_view(Destination::Settings));
        assert!(!Role::Auditor.can_view(Destination::Settings));
    }

    #[test]
    fn role_strings_round_trip() {
        assert_eq!(Role::SuperAdmin.to_string(), "Super Admin");
        assert_eq!(Role::from_str("super-admin").unwrap(), Role::SuperAdmin);
        assert_eq!(Role::from_str("Group Admin").unwrap(), Role::GroupAdmin);
        assert_eq!(Role::from_str("auditor").unwrap(), Role::Auditor);
    }
}
