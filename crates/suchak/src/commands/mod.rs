//! Command dispatch: bridges CLI args -> core actions -> output formatting.
//!
//! Every command family maps to one console page; the role gate runs
//! here, before any handler, so a hidden page is refused uniformly.

pub mod audit;
pub mod dashboard;
pub mod devices;
pub mod groups;
pub mod incidents;
pub mod reports;
pub mod settings;
pub mod users;
pub mod util;

use suchak_core::{Destination, Session};

use crate::cli::Command;
use crate::config::Resolved;
use crate::error::CliError;

/// The console page a command belongs to.
fn destination_of(cmd: &Command) -> Destination {
    match cmd {
        Command::Dashboard => Destination::Dashboard,
        Command::Users(_) => Destination::Users,
        Command::Devices(_) => Destination::Devices,
        Command::Groups(_) => Destination::Groups,
        Command::Incidents(_) => Destination::Incidents,
        Command::Audit(_) => Destination::AuditLogs,
        Command::Reports(_) => Destination::Reports,
        Command::Settings(_) => Destination::Settings,
    }
}

/// Dispatch a command to the appropriate page handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    resolved: &Resolved,
) -> Result<(), CliError> {
    let destination = destination_of(&cmd);
    if !session.role().can_view(destination) {
        return Err(CliError::PageForbidden {
            role: session.role().to_string(),
            page: destination.to_string(),
        });
    }

    tracing::debug!(command = ?cmd, page = %destination, "dispatching command");
    match cmd {
        Command::Dashboard => dashboard::handle(session, resolved),
        Command::Users(args) => users::handle(session, args, resolved).await,
        Command::Devices(args) => devices::handle(session, args, resolved).await,
        Command::Groups(args) => groups::handle(session, args, resolved).await,
        Command::Incidents(args) => incidents::handle(session, args, resolved).await,
        Command::Audit(args) => audit::handle(session, args, resolved),
        Command::Reports(args) => reports::handle(session, args, resolved),
        Command::Settings(args) => settings::handle(session, args, resolved).await,
    }
}
