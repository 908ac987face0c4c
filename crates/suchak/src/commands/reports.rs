//! Reports command handlers.
//!
//! Every report is a flat row set: render it like any list, and write
//! the same rows as CSV when `--export` is passed.

use serde::Serialize;
use tabled::Tabled;

use suchak_core::{Session, reports};

use crate::cli::{ReportExportArgs, ReportsArgs, ReportsCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: u64,
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Active Users")]
    users: u32,
}

#[derive(Tabled)]
struct GroupActivityRow {
    #[tabled(rename = "Group")]
    name: String,
    #[tabled(rename = "Messages")]
    messages: u64,
    #[tabled(rename = "Members")]
    members: u32,
}

#[derive(Tabled)]
struct ComplianceRow {
    #[tabled(rename = "Segment")]
    name: String,
    #[tabled(rename = "Share %")]
    value: u32,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Critical")]
    critical: u32,
    #[tabled(rename = "Warning")]
    warning: u32,
    #[tabled(rename = "Info")]
    info: u32,
    #[tabled(rename = "Total")]
    total: u32,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(session: &Session, args: ReportsArgs, resolved: &Resolved) -> Result<(), CliError> {
    let snapshot = session.snapshot();
    let data = &snapshot.data;

    match args.command {
        ReportsCommand::Overview(opts) => emit(
            resolved,
            &opts,
            &reports::overview(data),
            "overview_report",
            |r| MetricRow {
                metric: r.metric.clone(),
                value: r.value,
            },
            |r| r.metric.clone(),
        ),
        ReportsCommand::UserActivity(opts) => emit(
            resolved,
            &opts,
            &reports::user_activity(data),
            "user_activity_report",
            |r| ActivityRow {
                date: r.date.to_string(),
                users: r.users,
            },
            |r| r.date.to_string(),
        ),
        ReportsCommand::GroupActivity(opts) => emit(
            resolved,
            &opts,
            &reports::group_activity(data),
            "group_activity_report",
            |r| GroupActivityRow {
                name: r.name.clone(),
                messages: r.messages,
                members: r.members,
            },
            |r| r.name.clone(),
        ),
        ReportsCommand::Compliance(opts) => emit(
            resolved,
            &opts,
            &reports::compliance(data),
            "device_compliance_report",
            |r| ComplianceRow {
                name: r.name.clone(),
                value: r.value,
            },
            |r| r.name.clone(),
        ),
        ReportsCommand::Incidents(opts) => emit(
            resolved,
            &opts,
            &reports::incident_trend(data),
            "incidents_report",
            |r| TrendRow {
                date: r.date.to_string(),
                critical: r.critical,
                warning: r.warning,
                info: r.info,
                total: r.total,
            },
            |r| r.date.to_string(),
        ),
    }
}

/// Render a report, then optionally export the same rows.
fn emit<T, R>(
    resolved: &Resolved,
    opts: &ReportExportArgs,
    rows: &[T],
    label: &str,
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: Serialize,
    R: Tabled,
{
    let out = output::render_list(&resolved.output, rows, to_row, id_fn);
    output::print_output(&out, resolved.quiet);

    if opts.export {
        match suchak_core::export::write_csv(rows, label, &resolved.export_dir)? {
            Some(path) => output::status_line(
                &format!("Report written to {}", path.display()),
                &resolved.color,
                resolved.quiet,
            ),
            None => output::status_line("Nothing to export", &resolved.color, resolved.quiet),
        }
    }
    Ok(())
}
