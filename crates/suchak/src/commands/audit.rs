//! Audit trail command handlers.

use chrono::NaiveDate;
use tabled::Tabled;

use suchak_core::{AuditLog, Session, page, query};

use crate::cli::{AuditArgs, AuditCommand, AuditFilterArgs};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AuditRow {
    #[tabled(rename = "When")]
    timestamp: String,
    #[tabled(rename = "Actor")]
    actor: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Severity")]
    severity: String,
}

impl From<&&AuditLog> for AuditRow {
    fn from(l: &&AuditLog) -> Self {
        Self {
            timestamp: util::fmt_ts(l.timestamp),
            actor: l.actor.clone(),
            action: l.action.clone(),
            target: l.target.clone(),
            details: l.details.clone(),
            severity: l.severity.to_string(),
        }
    }
}

// ── Filter translation ──────────────────────────────────────────────

/// Date flags cover whole days: `--from` starts at midnight, `--to`
/// runs through the end of its day, both inclusive.
fn core_filter(args: &AuditFilterArgs) -> query::AuditFilter {
    query::AuditFilter {
        search: args.search.clone(),
        actor: args.actor.clone(),
        severity: args.severity,
        from: args.from.map(day_start),
        to: args.to.map(day_end),
    }
}

fn day_start(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
        .and_utc()
}

fn day_end(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
        .and_utc()
}

/// Render the collapsed page-number strip, e.g. `1 ... 4 [5] 6 ... 12`.
fn marker_strip(total_pages: usize, current: usize) -> String {
    page::page_markers(total_pages, current)
        .iter()
        .map(|m| match m {
            page::PageMarker::Number(n) if *n == current => format!("[{n}]"),
            page::PageMarker::Number(n) => n.to_string(),
            page::PageMarker::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(session: &Session, args: AuditArgs, resolved: &Resolved) -> Result<(), CliError> {
    match args.command {
        AuditCommand::List { filter, page: n } => {
            let snapshot = session.snapshot();
            let logs = query::filter_audit_logs(&snapshot.data, &core_filter(&filter));
            let page = page::paginate(&logs, n, page::AUDIT_PAGE_SIZE);

            let out = output::render_list(&resolved.output, &page.items, |l| AuditRow::from(l), |l| {
                l.id.clone()
            });
            output::print_output(&out, resolved.quiet);

            if !resolved.quiet && page.total_pages > 1 {
                eprintln!(
                    "Page {} of {} ({} entries)   {}",
                    page.number,
                    page.total_pages,
                    page.total_items,
                    marker_strip(page.total_pages, page.number)
                );
            }
            if !resolved.quiet && page.total_items == 0 {
                eprintln!("No audit logs found matching your filters.");
            }
            Ok(())
        }

        AuditCommand::Actors => {
            let snapshot = session.snapshot();
            let actors = query::audit_actors(&snapshot.data);
            output::print_output(&actors.join("\n"), resolved.quiet);
            Ok(())
        }

        AuditCommand::Export(filter) => {
            let snapshot = session.snapshot();
            let logs = query::filter_audit_logs(&snapshot.data, &core_filter(&filter));
            match suchak_core::export::write_csv(&logs, "audit_logs", &resolved.export_dir)? {
                Some(path) => output::status_line(
                    &format!("Exported {} entries to {}", logs.len(), path.display()),
                    &resolved.color,
                    resolved.quiet,
                ),
                None => output::status_line("Nothing to export", &resolved.color, resolved.quiet),
            }
            Ok(())
        }
    }
}
