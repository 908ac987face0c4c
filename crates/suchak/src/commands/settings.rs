//! Settings command handlers (Super Admin only; the dispatch gate has
//! already verified the role by the time these run).

use suchak_core::{Action, Session, SystemSettings};

use crate::cli::{SettingsArgs, SettingsCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(settings: &SystemSettings) -> String {
    [
        format!(
            "metadata_retention_days:        {}",
            settings.metadata_retention_days
        ),
        format!(
            "message_retention_days:         {}",
            settings.message_retention_days
        ),
        format!(
            "audit_log_retention_days:       {}",
            settings.audit_log_retention_days
        ),
        format!(
            "enable_auto_broadcast:          {}",
            settings.enable_auto_broadcast
        ),
        format!(
            "enable_incident_notifications:  {}",
            settings.enable_incident_notifications
        ),
        format!(
            "max_failed_logins:              {}",
            settings.max_failed_logins
        ),
        format!(
            "session_timeout_minutes:        {}",
            settings.session_timeout_minutes
        ),
        format!("enable_mfa:                     {}", settings.enable_mfa),
        format!(
            "auto_quarantine_rooted_devices: {}",
            settings.auto_quarantine_rooted_devices
        ),
    ]
    .join("\n")
}

pub async fn handle(
    session: &Session,
    args: SettingsArgs,
    resolved: &Resolved,
) -> Result<(), CliError> {
    match args.command {
        SettingsCommand::Show => {
            let settings = session.settings();
            let out = output::render_single(&resolved.output, &settings, |s| detail(s), |_| {
                "settings".to_string()
            });
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        SettingsCommand::Set { key, value } => {
            let change = session.update_setting(&key, &value).await?;
            output::status_line(
                &format!("Setting {} changed to {}", change.key, change.value),
                &resolved.color,
                resolved.quiet,
            );
            Ok(())
        }

        SettingsCommand::Broadcast { message, priority } => {
            if !util::confirm(
                "emergency broadcast",
                &format!("Send a {priority}-priority broadcast to ALL users?"),
                resolved.yes,
            )? {
                return Ok(());
            }
            session
                .apply(&Action::EmergencyBroadcast {
                    message,
                    priority,
                })
                .await?;
            output::status_line(
                "Emergency broadcast recorded",
                &resolved.color,
                resolved.quiet,
            );
            Ok(())
        }
    }
}
