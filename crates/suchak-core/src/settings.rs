//! Platform-wide settings, editable from the Super Admin page.
//!
//! Settings are console-session state, not part of the loaded
//! document; edits are validated against the typed fields here and
//! recorded in the audit trail.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Entity};

/// A validated, normalized settings edit, ready for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingChange {
    pub key: &'static str,
    pub value: String,
}

/// The tunable platform settings with their shipped defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SystemSettings {
    pub metadata_retention_days: u32,
    pub message_retention_days: u32,
    pub audit_log_retention_days: u32,
    pub enable_auto_broadcast: bool,
    pub enable_incident_notifications: bool,
    pub max_failed_logins: u32,
    pub session_timeout_minutes: u32,
    pub enable_mfa: bool,
    pub auto_quarantine_rooted_devices: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            metadata_retention_days: 90,
            message_retention_days: 30,
            audit_log_retention_days: 365,
            enable_auto_broadcast: true,
            enable_incident_notifications: true,
            max_failed_logins: 3,
            session_timeout_minutes: 30,
            enable_mfa: true,
            auto_quarantine_rooted_devices: true,
        }
    }
}

impl SystemSettings {
    /// Apply `value` to the setting named `key`.
    ///
    /// Unknown keys are lookup errors; unparseable values are
    /// validation errors. Returns the normalized change for auditing.
    pub fn set(&mut self, key: &str, value: &str) -> Result<SettingChange, CoreError> {
        match key {
            "metadata_retention_days" => {
                self.metadata_retention_days = parse_days(key, value)?;
            }
            "message_retention_days" => {
                self.message_retention_days = parse_days(key, value)?;
            }
            "audit_log_retention_days" => {
                self.audit_log_retention_days = parse_days(key, value)?;
            }
            "enable_auto_broadcast" => {
                self.enable_auto_broadcast = parse_flag(key, value)?;
            }
            "enable_incident_notifications" => {
                self.enable_incident_notifications = parse_flag(key, value)?;
            }
            "max_failed_logins" => {
                self.max_failed_logins = parse_count(key, value)?;
            }
            "session_timeout_minutes" => {
                self.session_timeout_minutes = parse_count(key, value)?;
            }
            "enable_mfa" => {
                self.enable_mfa = parse_flag(key, value)?;
            }
            "auto_quarantine_rooted_devices" => {
                self.auto_quarantine_rooted_devices = parse_flag(key, value)?;
            }
            _ => return Err(CoreError::not_found(Entity::Setting, key)),
        }
        Ok(SettingChange {
            key: canonical_key(key),
            value: value.trim().to_string(),
        })
    }

    /// All setting keys, for listing and for CLI completion.
    pub fn keys() -> &'static [&'static str] {
        &[
            "metadata_retention_days",
            "message_retention_days",
            "audit_log_retention_days",
            "enable_auto_broadcast",
            "enable_incident_notifications",
            "max_failed_logins",
            "session_timeout_minutes",
            "enable_mfa",
            "auto_quarantine_rooted_devices",
        ]
    }

}

fn canonical_key(key: &str) -> &'static str {
    SystemSettings::keys()
        .iter()
        .find(|k| **k == key)
        .copied()
        .unwrap_or("unknown")
}

fn parse_days(key: &str, value: &str) -> Result<u32, CoreError> {
    parse_count(key, value)
}

fn parse_count(key: &str, value: &str) -> Result<u32, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::validation(key, format!("expected a whole number, got '{value}'")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(CoreError::validation(
            key,
            format!("expected true/false, got '{value}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_parses_and_normalizes() {
        let mut settings = SystemSettings::default();
        let change = settings.set("session_timeout_minutes", " 45 ").unwrap();
        assert_eq!(settings.session_timeout_minutes, 45);
        assert_eq!(change.key, "session_timeout_minutes");
        assert_eq!(change.value, "45");

        settings.set("enable_mfa", "off").unwrap();
        assert!(!settings.enable_mfa);
    }

    #[test]
    fn unknown_key_is_a_lookup_error() {
        let mut settings = SystemSettings::default();
        assert!(matches!(
            settings.set("ludicrous_mode", "on").unwrap_err(),
            CoreError::NotFound { .. }
        ));
    }

    #[test]
    fn bad_value_is_a_validation_error() {
        let mut settings = SystemSettings::default();
        assert!(matches!(
            settings.set("max_failed_logins", "lots").unwrap_err(),
            CoreError::Validation { .. }
        ));
        // The setting is left untouched on failure.
        assert_eq!(settings.max_failed_logins, 3);
    }
}
