// ── Device domain types ──

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Security-posture classification derived from attestation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DeviceCompliance {
    Compliant,
    Rooted,
    Unknown,
}

impl DeviceCompliance {
    pub fn is_compliant(self) -> bool {
        matches!(self, Self::Compliant)
    }

    /// The state a quarantine toggle moves this device into.
    /// Compliant devices are quarantined to Rooted; anything else is
    /// restored to Compliant.
    pub fn toggled(self) -> Self {
        match self {
            Self::Compliant => Self::Rooted,
            Self::Rooted | Self::Unknown => Self::Compliant,
        }
    }
}

/// An enrolled handset.
///
/// `user_id` is advisory -- the owning user may be missing from the
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub user_id: String,
    pub model: String,
    pub os: String,
    pub compliance: DeviceCompliance,
    pub attested_at: DateTime<Utc>,
    pub ip: IpAddr,
    /// Attestation verdict strength, 0-100.
    pub safety_score: u8,
}
