//! User management command handlers.

use tabled::Tabled;

use suchak_core::{Action, Session, User, UserTransition, query};

use crate::cli::{BulkAction, UserFilterArgs, UsersArgs, UsersCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Service ID")]
    service_id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Login")]
    last_login: String,
    #[tabled(rename = "Groups")]
    groups: u32,
}

impl From<&&User> for UserRow {
    fn from(u: &&User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            role: u.role.clone(),
            // Masked in listings, shown in full on the detail view.
            service_id: format!("{}****", u.service_id),
            status: u.status.to_string(),
            last_login: util::fmt_opt_ts(u.last_login),
            groups: u.groups,
        }
    }
}

fn detail(session: &Session, user: &User) -> String {
    let snapshot = session.snapshot();
    let data = &snapshot.data;

    let mut lines = vec![
        format!("ID:         {}", user.id),
        format!("Name:       {}", user.name),
        format!("Role:       {}", user.role),
        format!("Service ID: {}", user.service_id),
        format!("Email:      {}", user.email),
        format!("Phone:      {}", user.phone),
        format!("Status:     {}", user.status),
        format!("Verified:   {}", user.verified),
        format!("Joined:     {}", util::fmt_ts(user.joined_at)),
        format!("Last Login: {}", util::fmt_opt_ts(user.last_login)),
        format!("Groups:     {}", user.groups),
    ];

    if let Some(device) = user.device_id.as_deref().and_then(|id| data.device(id)) {
        lines.push(String::new());
        lines.push("Device".to_string());
        lines.push(format!("  Model:      {}", device.model));
        lines.push(format!("  OS:         {}", device.os));
        lines.push(format!("  Compliance: {}", device.compliance));
        lines.push(format!("  Attested:   {}", util::fmt_ts(device.attested_at)));
    }

    let recent: Vec<_> = data
        .audit_logs
        .iter()
        .filter(|l| l.target == user.id)
        .take(10)
        .collect();
    if !recent.is_empty() {
        lines.push(String::new());
        lines.push("Recent Activity".to_string());
        for log in recent {
            lines.push(format!(
                "  {}  {}  {}",
                util::fmt_ts(log.timestamp),
                log.action,
                log.details
            ));
        }
    }

    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

fn core_filter(args: &UserFilterArgs) -> query::UserFilter {
    query::UserFilter {
        search: args.search.clone(),
        status: args.status,
    }
}

pub async fn handle(
    session: &Session,
    args: UsersArgs,
    resolved: &Resolved,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List(filter) => {
            let snapshot = session.snapshot();
            let users = query::filter_users(&snapshot.data, &core_filter(&filter));
            let out = output::render_list(&resolved.output, &users, |u| UserRow::from(u), |u| {
                u.id.clone()
            });
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        UsersCommand::Show { user } => {
            let snapshot = session.snapshot();
            let Some(found) = snapshot.data.user(&user) else {
                return Err(CliError::NotFound {
                    resource_type: "user".to_string(),
                    identifier: user,
                    list_command: "users list".to_string(),
                });
            };
            let out = output::render_single(
                &resolved.output,
                found,
                |u| detail(session, u),
                |u| u.id.clone(),
            );
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        UsersCommand::Approve { user } => {
            transition(session, resolved, user, UserTransition::Approve).await
        }

        UsersCommand::Suspend { user } => {
            if !util::confirm(
                "suspend user",
                &format!("Suspend user '{user}'? This immediately revokes their access."),
                resolved.yes,
            )? {
                return Ok(());
            }
            transition(session, resolved, user, UserTransition::Suspend).await
        }

        UsersCommand::Activate { user } => {
            transition(session, resolved, user, UserTransition::Activate).await
        }

        UsersCommand::Bulk { action, users } => {
            let transition = match action {
                BulkAction::Approve => UserTransition::Approve,
                BulkAction::Suspend => UserTransition::Suspend,
            };
            if transition == UserTransition::Suspend
                && !util::confirm(
                    "bulk suspend",
                    &format!("Suspend {} selected users?", users.len()),
                    resolved.yes,
                )?
            {
                return Ok(());
            }
            session
                .apply(&Action::BulkUserStatus {
                    user_ids: users,
                    transition,
                })
                .await?;
            output::status_line(
                &format!("Bulk {transition} applied"),
                &resolved.color,
                resolved.quiet,
            );
            Ok(())
        }

        UsersCommand::Export(filter) => {
            let snapshot = session.snapshot();
            let users = query::filter_users(&snapshot.data, &core_filter(&filter));
            match suchak_core::export::write_csv(&users, "users", &resolved.export_dir)? {
                Some(path) => output::status_line(
                    &format!("Exported {} users to {}", users.len(), path.display()),
                    &resolved.color,
                    resolved.quiet,
                ),
                None => output::status_line("Nothing to export", &resolved.color, resolved.quiet),
            }
            Ok(())
        }
    }
}

async fn transition(
    session: &Session,
    resolved: &Resolved,
    user: String,
    transition: UserTransition,
) -> Result<(), CliError> {
    session
        .apply(&Action::UserStatus {
            user_id: user.clone(),
            transition,
        })
        .await?;
    output::status_line(
        &format!("User {user} {}", transition.past_label()),
        &resolved.color,
        resolved.quiet,
    );
    Ok(())
}
