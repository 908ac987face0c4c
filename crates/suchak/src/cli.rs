//! Clap derive structures for the `suchak` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Each page of the console is one subcommand family; the role chosen
//! at sign-in (`--role`) decides which pages open at all.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use chrono::NaiveDate;

use suchak_core::{
    BroadcastPriority, DeviceCompliance, GroupType, IncidentStatus, Role, Severity, UserStatus,
};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// suchak -- administrative console for the SUCHAK platform
#[derive(Debug, Parser)]
#[command(
    name = "suchak",
    version,
    about = "Manage SUCHAK users, devices, groups, and incidents from the command line",
    long_about = "Administrative console for the SUCHAK secure-communications platform.\n\n\
        Loads the administrative document once per invocation, applies the\n\
        requested action in session state, and records every mutation in the\n\
        audit trail. Nothing is written back to the document.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the administrative JSON document
    #[arg(long, short = 'd', env = "SUCHAK_DATA_PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Console role to sign in with
    #[arg(long, short = 'r', env = "SUCHAK_ROLE", global = true)]
    pub role: Option<RoleArg>,

    /// Operator name recorded on audit entries
    #[arg(long, env = "SUCHAK_OPERATOR", global = true)]
    pub operator: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "SUCHAK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Directory CSV exports are written into
    #[arg(long, env = "SUCHAK_EXPORT_DIR", global = true)]
    pub export_dir: Option<PathBuf>,

    /// Simulated commit latency in milliseconds (overrides config)
    #[arg(long, env = "SUCHAK_LATENCY_MS", global = true)]
    pub latency_ms: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Shared Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    /// Full access, including Settings
    SuperAdmin,
    /// Management actions, no Settings
    GroupAdmin,
    /// Read-only: Dashboard, Audit Logs, Reports
    Auditor,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::SuperAdmin => Role::SuperAdmin,
            RoleArg::GroupAdmin => Role::GroupAdmin,
            RoleArg::Auditor => Role::Auditor,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

// ── Enum value parsers ───────────────────────────────────────────────
//
// Filter flags parse straight into the core enums; the error text
// names the accepted values so a typo is self-explaining.

fn enum_parser<T: FromStr>(s: &str, accepted: &str) -> Result<T, String> {
    T::from_str(s).map_err(|_| format!("expected one of: {accepted}"))
}

pub fn parse_user_status(s: &str) -> Result<UserStatus, String> {
    enum_parser(s, "Active, Pending, Suspended")
}

pub fn parse_compliance(s: &str) -> Result<DeviceCompliance, String> {
    enum_parser(s, "Compliant, Rooted, Unknown")
}

pub fn parse_group_type(s: &str) -> Result<GroupType, String> {
    enum_parser(s, "Operational, Family, Veteran")
}

pub fn parse_severity(s: &str) -> Result<Severity, String> {
    enum_parser(s, "Info, Warning, Critical")
}

pub fn parse_incident_status(s: &str) -> Result<IncidentStatus, String> {
    enum_parser(s, "Open, Investigating, Resolved")
}

pub fn parse_priority(s: &str) -> Result<BroadcastPriority, String> {
    enum_parser(s, "high, critical")
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("expected a YYYY-MM-DD date, got '{s}'"))
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Platform health at a glance
    #[command(alias = "dash")]
    Dashboard,

    /// Manage platform members
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage enrolled devices and their compliance
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Manage messaging groups and join requests
    #[command(alias = "g")]
    Groups(GroupsArgs),

    /// Triage incidents and alerts
    #[command(alias = "inc")]
    Incidents(IncidentsArgs),

    /// Browse and export the audit trail
    Audit(AuditArgs),

    /// Reports and analytics
    #[command(alias = "rep")]
    Reports(ReportsArgs),

    /// Platform settings (Super Admin only)
    Settings(SettingsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

/// Shared search/status filter for user listings.
#[derive(Debug, Args)]
pub struct UserFilterArgs {
    /// Substring match over name, service id, and email
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Exact status match
    #[arg(long, value_parser = parse_user_status)]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    #[command(alias = "ls")]
    List(UserFilterArgs),

    /// Show one user in full, with device and recent activity
    Show {
        /// User id
        user: String,
    },

    /// Approve a pending user
    Approve {
        /// User id
        user: String,
    },

    /// Suspend a user, revoking platform access
    Suspend {
        /// User id
        user: String,
    },

    /// Re-activate a suspended user
    Activate {
        /// User id
        user: String,
    },

    /// Apply one transition to several users in a single commit
    Bulk {
        #[arg(value_enum)]
        action: BulkAction,

        /// User ids
        #[arg(required = true)]
        users: Vec<String>,
    },

    /// Export the (filtered) user list as users.csv
    Export(UserFilterArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BulkAction {
    Approve,
    Suspend,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Args)]
pub struct DeviceFilterArgs {
    /// Substring match over device id, owner name, and model
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Exact compliance match
    #[arg(long, value_parser = parse_compliance)]
    pub compliance: Option<DeviceCompliance>,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices with owner and compliance
    #[command(alias = "ls")]
    List(DeviceFilterArgs),

    /// Show one device in full
    Show {
        /// Device id
        device: String,
    },

    /// Toggle quarantine: flips compliance and opens a Warning incident
    Quarantine {
        /// Device id
        device: String,
    },

    /// Re-run attestation: fresh timestamp and safety score
    Attest {
        /// Device id
        device: String,
    },

    /// Export the (filtered) device list as devices.csv
    Export(DeviceFilterArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Args)]
pub struct GroupFilterArgs {
    /// Substring match over group name and id
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Exact group type match
    #[arg(long = "type", value_parser = parse_group_type)]
    pub group_type: Option<GroupType>,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups
    #[command(alias = "ls")]
    List(GroupFilterArgs),

    /// Show one group, including pending join requests
    Show {
        /// Group id
        group: String,
    },

    /// Create a group (you are its first member)
    Create {
        /// Group name
        name: String,

        /// Group type
        #[arg(long = "type", value_parser = parse_group_type)]
        group_type: GroupType,
    },

    /// Approve a pending join request
    ApproveRequest {
        /// Group id
        group: String,
        /// Requesting user id
        user: String,
    },

    /// Reject a pending join request
    RejectRequest {
        /// Group id
        group: String,
        /// Requesting user id
        user: String,
    },

    /// Export the (filtered) group list as groups.csv
    Export(GroupFilterArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INCIDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IncidentsArgs {
    #[command(subcommand)]
    pub command: IncidentsCommand,
}

#[derive(Debug, Args)]
pub struct IncidentFilterArgs {
    /// Substring match over summary, type, and id
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Exact severity match
    #[arg(long, value_parser = parse_severity)]
    pub severity: Option<Severity>,

    /// Exact status match
    #[arg(long, value_parser = parse_incident_status)]
    pub status: Option<IncidentStatus>,
}

#[derive(Debug, Subcommand)]
pub enum IncidentsCommand {
    /// List incidents
    #[command(alias = "ls")]
    List(IncidentFilterArgs),

    /// Show one incident in full
    Show {
        /// Incident id
        incident: String,
    },

    /// Acknowledge an open incident (moves it to Investigating)
    #[command(alias = "ack")]
    Acknowledge {
        /// Incident id
        incident: String,
    },

    /// Take over an investigation
    Investigate {
        /// Incident id
        incident: String,
    },

    /// Resolve an incident under investigation
    Resolve {
        /// Incident id
        incident: String,
    },

    /// Export the (filtered) incident list as incidents.csv
    Export(IncidentFilterArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUDIT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub command: AuditCommand,
}

#[derive(Debug, Args)]
pub struct AuditFilterArgs {
    /// Substring match over action, target, and details
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Exact actor match (see `audit actors`)
    #[arg(long)]
    pub actor: Option<String>,

    /// Exact severity match
    #[arg(long, value_parser = parse_severity)]
    pub severity: Option<Severity>,

    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List one page of the (filtered) audit trail
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: AuditFilterArgs,

        /// Page number (20 entries per page)
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,
    },

    /// List the distinct actors seen in the trail
    Actors,

    /// Export the whole (filtered) trail as audit_logs.csv
    Export(AuditFilterArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// Headline platform metrics
    Overview(ReportExportArgs),

    /// 30-day active-user series
    UserActivity(ReportExportArgs),

    /// Message volume and membership per group
    GroupActivity(ReportExportArgs),

    /// Fleet compliance breakdown
    Compliance(ReportExportArgs),

    /// Incident counts per day and severity
    Incidents(ReportExportArgs),
}

#[derive(Debug, Args)]
pub struct ReportExportArgs {
    /// Also write the report as CSV into the export directory
    #[arg(long)]
    pub export: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current platform settings
    Show,

    /// Change one setting (see `settings show` for keys)
    Set {
        /// Setting key, e.g. session_timeout_minutes
        key: String,
        /// New value
        value: String,
    },

    /// Send an emergency broadcast to all users
    Broadcast {
        /// Broadcast text
        #[arg(long, short = 'm')]
        message: String,

        /// Broadcast priority
        #[arg(long, default_value = "high", value_parser = parse_priority)]
        priority: BroadcastPriority,
    },
}
