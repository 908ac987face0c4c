//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use suchak_core::AdminData;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
/// Outside a terminal there is nobody to ask, so the action is
/// refused instead of silently proceeding.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_string(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Render a timestamp for table cells.
pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Render an optional timestamp; the console shows "Never" for users
/// who have not signed in yet.
pub fn fmt_opt_ts(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "Never".to_string(), fmt_ts)
}

/// Resolve a user id to a display name, tolerating orphaned keys.
pub fn user_name_or_unknown(data: &AdminData, user_id: &str) -> String {
    data.user(user_id)
        .map_or_else(|| "Unknown".to_string(), |u| u.name.clone())
}

/// Render an assignee, tolerating the unassigned case.
pub fn assignee_or_unassigned(assigned_to: Option<&str>) -> String {
    assigned_to.map_or_else(|| "Unassigned".to_string(), str::to_string)
}
