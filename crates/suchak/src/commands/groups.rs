//! Group management command handlers.

use tabled::Tabled;

use suchak_core::{Action, Group, Session, query};

use crate::cli::{GroupFilterArgs, GroupsArgs, GroupsCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group ID")]
    group_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    group_type: String,
    #[tabled(rename = "Members")]
    members: u32,
    #[tabled(rename = "Pending")]
    pending: usize,
    #[tabled(rename = "Activity")]
    activity: u64,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&&Group> for GroupRow {
    fn from(g: &&Group) -> Self {
        Self {
            group_id: g.group_id.clone(),
            name: g.name.clone(),
            group_type: g.group_type.to_string(),
            members: g.members,
            pending: g.pending_requests.len(),
            activity: g.activity,
            created_at: util::fmt_ts(g.created_at),
        }
    }
}

fn detail(group: &Group) -> String {
    let mut lines = vec![
        format!("Group ID: {}", group.group_id),
        format!("Name:     {}", group.name),
        format!("Type:     {}", group.group_type),
        format!("Members:  {}", group.members),
        format!("Activity: {} messages", group.activity),
        format!("Created:  {}", util::fmt_ts(group.created_at)),
    ];
    if !group.pending_requests.is_empty() {
        lines.push(String::new());
        lines.push("Pending Join Requests".to_string());
        for request in &group.pending_requests {
            lines.push(format!(
                "  {}  {} ({})  {}",
                util::fmt_ts(request.requested_at),
                request.user_name,
                request.user_id,
                request.reason
            ));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

fn core_filter(args: &GroupFilterArgs) -> query::GroupFilter {
    query::GroupFilter {
        search: args.search.clone(),
        group_type: args.group_type,
    }
}

pub async fn handle(
    session: &Session,
    args: GroupsArgs,
    resolved: &Resolved,
) -> Result<(), CliError> {
    match args.command {
        GroupsCommand::List(filter) => {
            let snapshot = session.snapshot();
            let groups = query::filter_groups(&snapshot.data, &core_filter(&filter));
            let out = output::render_list(&resolved.output, &groups, |g| GroupRow::from(g), |g| {
                g.group_id.clone()
            });
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        GroupsCommand::Show { group } => {
            let snapshot = session.snapshot();
            let Some(found) = snapshot.data.group(&group) else {
                return Err(CliError::NotFound {
                    resource_type: "group".to_string(),
                    identifier: group,
                    list_command: "groups list".to_string(),
                });
            };
            let out = output::render_single(&resolved.output, found, |g| detail(g), |g| {
                g.group_id.clone()
            });
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        GroupsCommand::Create { name, group_type } => {
            let after = session
                .apply(&Action::CreateGroup {
                    name: name.clone(),
                    group_type,
                })
                .await?;
            let group_id = after
                .data
                .groups
                .first()
                .map_or_else(String::new, |g| g.group_id.clone());
            output::status_line(
                &format!("Created {group_type} group '{name}' ({group_id})"),
                &resolved.color,
                resolved.quiet,
            );
            Ok(())
        }

        GroupsCommand::ApproveRequest { group, user } => {
            resolve_request(session, resolved, group, user, true).await
        }

        GroupsCommand::RejectRequest { group, user } => {
            resolve_request(session, resolved, group, user, false).await
        }

        GroupsCommand::Export(filter) => {
            let snapshot = session.snapshot();
            let groups = query::filter_groups(&snapshot.data, &core_filter(&filter));
            match suchak_core::export::write_csv(&groups, "groups", &resolved.export_dir)? {
                Some(path) => output::status_line(
                    &format!("Exported {} groups to {}", groups.len(), path.display()),
                    &resolved.color,
                    resolved.quiet,
                ),
                None => output::status_line("Nothing to export", &resolved.color, resolved.quiet),
            }
            Ok(())
        }
    }
}

async fn resolve_request(
    session: &Session,
    resolved: &Resolved,
    group: String,
    user: String,
    approve: bool,
) -> Result<(), CliError> {
    session
        .apply(&Action::ResolveJoinRequest {
            group_id: group.clone(),
            user_id: user.clone(),
            approve,
        })
        .await?;
    let verdict = if approve { "approved" } else { "rejected" };
    output::status_line(
        &format!("Join request from {user} to {group} {verdict}"),
        &resolved.color,
        resolved.quiet,
    );
    Ok(())
}
