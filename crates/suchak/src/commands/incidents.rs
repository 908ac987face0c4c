//! Incident triage command handlers.

use tabled::Tabled;

use suchak_core::{Action, Incident, IncidentTransition, Session, query};

use crate::cli::{IncidentFilterArgs, IncidentsArgs, IncidentsCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    incident_type: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "When")]
    timestamp: String,
    #[tabled(rename = "Assigned To")]
    assigned_to: String,
    #[tabled(rename = "Summary")]
    summary: String,
}

impl From<&&Incident> for IncidentRow {
    fn from(i: &&Incident) -> Self {
        Self {
            id: i.id.clone(),
            incident_type: i.incident_type.clone(),
            severity: i.severity.to_string(),
            status: i.status.to_string(),
            timestamp: util::fmt_ts(i.timestamp),
            assigned_to: util::assignee_or_unassigned(i.assigned_to.as_deref()),
            summary: i.summary.clone(),
        }
    }
}

fn detail(session: &Session, incident: &Incident) -> String {
    let snapshot = session.snapshot();
    [
        format!("ID:          {}", incident.id),
        format!("Type:        {}", incident.incident_type),
        format!("Severity:    {}", incident.severity),
        format!("Status:      {}", incident.status),
        format!("When:        {}", util::fmt_ts(incident.timestamp)),
        format!(
            "Subject:     {}",
            util::user_name_or_unknown(&snapshot.data, &incident.user_id)
        ),
        format!(
            "Assigned To: {}",
            util::assignee_or_unassigned(incident.assigned_to.as_deref())
        ),
        format!("Summary:     {}", incident.summary),
        format!("Description: {}", incident.description),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

fn core_filter(args: &IncidentFilterArgs) -> query::IncidentFilter {
    query::IncidentFilter {
        search: args.search.clone(),
        severity: args.severity,
        status: args.status,
    }
}

pub async fn handle(
    session: &Session,
    args: IncidentsArgs,
    resolved: &Resolved,
) -> Result<(), CliError> {
    match args.command {
        IncidentsCommand::List(filter) => {
            let snapshot = session.snapshot();
            let incidents = query::filter_incidents(&snapshot.data, &core_filter(&filter));
            let out = output::render_list(&resolved.output, &incidents, |i| IncidentRow::from(i), |i| {
                i.id.clone()
            });
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        IncidentsCommand::Show { incident } => {
            let snapshot = session.snapshot();
            let Some(found) = snapshot.data.incident(&incident) else {
                return Err(CliError::NotFound {
                    resource_type: "incident".to_string(),
                    identifier: incident,
                    list_command: "incidents list".to_string(),
                });
            };
            let out = output::render_single(
                &resolved.output,
                found,
                |i| detail(session, i),
                |i| i.id.clone(),
            );
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        IncidentsCommand::Acknowledge { incident } => {
            transition(session, resolved, incident, IncidentTransition::Acknowledge).await
        }

        IncidentsCommand::Investigate { incident } => {
            transition(session, resolved, incident, IncidentTransition::Investigate).await
        }

        IncidentsCommand::Resolve { incident } => {
            transition(session, resolved, incident, IncidentTransition::Resolve).await
        }

        IncidentsCommand::Export(filter) => {
            let snapshot = session.snapshot();
            let incidents = query::filter_incidents(&snapshot.data, &core_filter(&filter));
            match suchak_core::export::write_csv(&incidents, "incidents", &resolved.export_dir)? {
                Some(path) => output::status_line(
                    &format!(
                        "Exported {} incidents to {}",
                        incidents.len(),
                        path.display()
                    ),
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
    incident: String,
    transition: IncidentTransition,
) -> Result<(), CliError> {
    session
        .apply(&Action::Incident {
            incident_id: incident.clone(),
            transition,
        })
        .await?;
    output::status_line(
        &format!("Incident {incident} {}", transition.past_label()),
        &resolved.color,
        resolved.quiet,
    );
    Ok(())
}
