//! Device management command handlers.

use tabled::Tabled;

use suchak_core::{Action, Device, Session, query};

use crate::cli::{DeviceFilterArgs, DevicesArgs, DevicesCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device ID")]
    device_id: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "OS")]
    os: String,
    #[tabled(rename = "Compliance")]
    compliance: String,
    #[tabled(rename = "Safety")]
    safety_score: u8,
    #[tabled(rename = "Attested")]
    attested_at: String,
}

fn detail(session: &Session, device: &Device) -> String {
    let snapshot = session.snapshot();
    let data = &snapshot.data;
    [
        format!("Device ID:  {}", device.device_id),
        format!(
            "Owner:      {}",
            util::user_name_or_unknown(data, &device.user_id)
        ),
        format!("Model:      {}", device.model),
        format!("OS:         {}", device.os),
        format!("Compliance: {}", device.compliance),
        format!("Safety:     {}/100", device.safety_score),
        format!("Attested:   {}", util::fmt_ts(device.attested_at)),
        format!("IP:         {}", device.ip),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

fn core_filter(args: &DeviceFilterArgs) -> query::DeviceFilter {
    query::DeviceFilter {
        search: args.search.clone(),
        compliance: args.compliance,
    }
}

pub async fn handle(
    session: &Session,
    args: DevicesArgs,
    resolved: &Resolved,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(filter) => {
            let snapshot = session.snapshot();
            let devices = query::filter_devices(&snapshot.data, &core_filter(&filter));
            let out = output::render_list(
                &resolved.output,
                &devices,
                |d| DeviceRow {
                    device_id: d.device_id.clone(),
                    owner: util::user_name_or_unknown(&snapshot.data, &d.user_id),
                    model: d.model.clone(),
                    os: d.os.clone(),
                    compliance: d.compliance.to_string(),
                    safety_score: d.safety_score,
                    attested_at: util::fmt_ts(d.attested_at),
                },
                |d| d.device_id.clone(),
            );
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        DevicesCommand::Show { device } => {
            let snapshot = session.snapshot();
            let Some(found) = snapshot.data.device(&device) else {
                return Err(CliError::NotFound {
                    resource_type: "device".to_string(),
                    identifier: device,
                    list_command: "devices list".to_string(),
                });
            };
            let out = output::render_single(
                &resolved.output,
                found,
                |d| detail(session, d),
                |d| d.device_id.clone(),
            );
            output::print_output(&out, resolved.quiet);
            Ok(())
        }

        DevicesCommand::Quarantine { device } => {
            if !util::confirm(
                "quarantine device",
                &format!(
                    "Toggle quarantine for device '{device}'? This flips its compliance\n\
                     and opens a Warning incident."
                ),
                resolved.yes,
            )? {
                return Ok(());
            }
            let after = session
                .apply(&Action::ToggleQuarantine {
                    device_id: device.clone(),
                })
                .await?;
            let compliance = after
                .data
                .device(&device)
                .map_or_else(|| "?".to_string(), |d| d.compliance.to_string());
            let incident = after
                .data
                .incidents
                .first()
                .map_or_else(String::new, |i| format!(" (incident {})", i.id));
            output::status_line(
                &format!("Device {device} is now {compliance}{incident}"),
                &resolved.color,
                resolved.quiet,
            );
            Ok(())
        }

        DevicesCommand::Attest { device } => {
            let after = session
                .apply(&Action::RerunAttestation {
                    device_id: device.clone(),
                })
                .await?;
            let score = after.data.device(&device).map_or(0, |d| d.safety_score);
            output::status_line(
                &format!("Attestation complete for {device}: safety score {score}/100"),
                &resolved.color,
                resolved.quiet,
            );
            Ok(())
        }

        DevicesCommand::Export(filter) => {
            let snapshot = session.snapshot();
            let devices = query::filter_devices(&snapshot.data, &core_filter(&filter));
            match suchak_core::export::write_csv(&devices, "devices", &resolved.export_dir)? {
                Some(path) => output::status_line(
                    &format!("Exported {} devices to {}", devices.len(), path.display()),
                    &resolved.color,
                    resolved.quiet,
                ),
                None => output::status_line("Nothing to export", &resolved.color, resolved.quiet),
            }
            Ok(())
        }
    }
}
