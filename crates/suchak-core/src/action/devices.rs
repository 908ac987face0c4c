// ── Device compliance actions ──

use rand::Rng;

use crate::audit::{ActionContext, AuditDraft, append_entry, append_entry_as};
use crate::error::{CoreError, Entity};
use crate::model::{Actor, AdminData, Incident, IncidentStatus, Severity};

/// Flip a device's compliance and raise a Warning incident, all in one
/// document replacement: device array, incident array, and audit log
/// change together or not at all.
pub(crate) fn toggle_quarantine(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    device_id: &str,
) -> Result<AdminData, CoreError> {
    let Some(device) = data.device(device_id) else {
        return Err(CoreError::not_found(Entity::Device, device_id));
    };
    let owner_id = device.user_id.clone();

    let mut next = data.clone();
    for d in &mut next.devices {
        if d.device_id == device_id {
            d.compliance = d.compliance.toggled();
        }
    }

    next.incidents.insert(
        0,
        Incident {
            id: ctx.ids.incident_id(),
            incident_type: "Device Action".to_string(),
            severity: Severity::Warning,
            timestamp: ctx.now,
            user_id: owner_id,
            status: IncidentStatus::Open,
            summary: "Device quarantine status changed".to_string(),
            description: format!("Device {device_id} quarantine status modified by admin"),
            assigned_to: None,
        },
    );

    Ok(append_entry(
        next,
        ctx,
        AuditDraft::new(
            "Device Quarantine Toggle",
            device_id,
            "Device compliance status changed",
            Severity::Warning,
        ),
    ))
}

/// Refresh a device's attestation: new timestamp, newly sampled safety
/// score. Attested by the platform, so the audit actor is `System`.
pub(crate) fn rerun_attestation<R: Rng>(
    data: &AdminData,
    ctx: &ActionContext<'_>,
    device_id: &str,
    rng: &mut R,
) -> Result<AdminData, CoreError> {
    if data.device(device_id).is_none() {
        return Err(CoreError::not_found(Entity::Device, device_id));
    }
    let score = sample_safety_score(rng);

    let mut next = data.clone();
    for d in &mut next.devices {
        if d.device_id == device_id {
            d.attested_at = ctx.now;
            d.safety_score = score;
        }
    }

    append_entry_as(
        &mut next,
        ctx,
        &Actor::System,
        AuditDraft::new(
            "Device Attestation Rerun",
            device_id,
            "Manual attestation rerun requested by admin",
            Severity::Info,
        ),
    );
    Ok(next)
}

/// Attestation verdict sampling: a coin flip between a healthy band
/// (80-99) and a degraded band (30-69).
pub fn sample_safety_score<R: Rng>(rng: &mut R) -> u8 {
    if rng.gen_bool(0.5) {
        rng.gen_range(80..100)
    } else {
        rng.gen_range(30..70)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::model::DeviceCompliance;
    use crate::testutil::{fixture_document, test_context};

    #[test]
    fn quarantine_flips_and_raises_incident_in_one_replacement() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let incidents_before = data.incidents.len();
        let logs_before = data.audit_logs.len();

        let next = toggle_quarantine(&data, &ctx, "D001").unwrap();

        assert_eq!(
            next.device("D001").unwrap().compliance,
            DeviceCompliance::Rooted
        );
        assert_eq!(next.incidents.len(), incidents_before + 1);
        let incident = &next.incidents[0];
        assert_eq!(incident.incident_type, "Device Action");
        assert_eq!(incident.severity, Severity::Warning);
        assert_eq!(incident.status, IncidentStatus::Open);
        assert_eq!(incident.user_id, data.device("D001").unwrap().user_id);

        assert_eq!(next.audit_logs.len(), logs_before + 1);
        assert_eq!(next.audit_logs[0].severity, Severity::Warning);
        assert_eq!(next.audit_logs[0].target, "D001");

        // Input document untouched on all three arrays.
        assert_eq!(
            data.device("D001").unwrap().compliance,
            DeviceCompliance::Compliant
        );
        assert_eq!(data.incidents.len(), incidents_before);
        assert_eq!(data.audit_logs.len(), logs_before);
    }

    #[test]
    fn quarantine_restores_non_compliant_devices() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);

        // D002 is seeded Rooted.
        let next = toggle_quarantine(&data, &ctx, "D002").unwrap();
        assert_eq!(
            next.device("D002").unwrap().compliance,
            DeviceCompliance::Compliant
        );
    }

    #[test]
    fn attestation_refreshes_timestamp_and_score() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let mut rng = StdRng::seed_from_u64(7);

        let next = rerun_attestation(&data, &ctx, "D001", &mut rng).unwrap();

        let device = next.device("D001").unwrap();
        assert_eq!(device.attested_at, ctx.now);
        assert!((30..100).contains(&device.safety_score));
        assert_eq!(next.audit_logs[0].actor, "System");
        assert_eq!(next.audit_logs[0].severity, Severity::Info);
    }

    #[test]
    fn sampled_scores_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let score = sample_safety_score(&mut rng);
            assert!((30..70).contains(&score) || (80..100).contains(&score));
        }
    }

    #[test]
    fn unknown_device_is_a_lookup_error() {
        let data = fixture_document();
        let ids = crate::audit::IdGenerator::new();
        let ctx = test_context(&ids);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            toggle_quarantine(&data, &ctx, "D999").unwrap_err(),
            CoreError::NotFound { .. }
        ));
        assert!(matches!(
            rerun_attestation(&data, &ctx, "D999", &mut rng).unwrap_err(),
            CoreError::NotFound { .. }
        ));
    }
}
