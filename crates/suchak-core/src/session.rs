// ── Console session ──
//
// Owns everything a signed-in console holds: the versioned document
// store, the chosen role, the operator name, the id sequence, and the
// platform settings. Sessions are explicitly constructed and passed
// around, never ambient, so tests can run as many independent ones as
// they like.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::access::Role;
use crate::action::{self, Action};
use crate::audit::{ActionContext, IdGenerator};
use crate::error::CoreError;
use crate::model::{Actor, AdminData};
use crate::settings::{SettingChange, SystemSettings};
use crate::store::{Snapshot, Store};

/// Default operator display name recorded on audit entries.
const DEFAULT_OPERATOR: &str = "Current User";

/// A signed-in console session over one loaded document.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: Store,
    role: Role,
    operator: String,
    ids: IdGenerator,
    settings: Mutex<SystemSettings>,
    /// Simulated commit latency, modeling the remote round-trip the
    /// console pretends to make. Zero by default.
    latency: Duration,
}

impl Session {
    /// Start a session over an already-loaded document.
    pub fn new(data: AdminData, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: Store::new(data),
            role,
            operator: DEFAULT_OPERATOR.to_string(),
            ids: IdGenerator::new(),
            settings: Mutex::new(SystemSettings::default()),
            latency: Duration::ZERO,
        }
    }

    /// Load the document from a JSON file and start a session. Any
    /// load failure is fatal -- there is no retry and no partial
    /// document.
    pub fn open(path: impl AsRef<std::path::Path>, role: Role) -> Result<Self, CoreError> {
        let data = AdminData::from_json_file(path)?;
        Ok(Self::new(data, role))
    }

    pub fn with_operator(mut self, name: impl Into<String>) -> Self {
        self.operator = name.into();
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn actor(&self) -> Actor {
        Actor::admin(self.role, self.operator.clone())
    }

    /// The current document snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    /// The current platform settings.
    pub fn settings(&self) -> SystemSettings {
        self.lock_settings().clone()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Apply a mutating action and commit the replacement document.
    ///
    /// Sleeps the configured latency first, then runs the pure
    /// transform against a fresh snapshot and commits it. If another
    /// commit lands in between, the transform re-runs on the new
    /// snapshot instead of overwriting it, so concurrent actions
    /// serialize without losing updates.
    pub async fn apply(&self, action: &Action) -> Result<Arc<Snapshot>, CoreError> {
        self.authorize(action)?;
        self.simulate_latency().await;

        loop {
            let base = self.store.snapshot();
            let ctx = self.context();
            let mut rng = rand::thread_rng();
            let next = action::apply(&base.data, &ctx, action, &mut rng)?;
            match self.store.commit(&base, next) {
                Ok(installed) => {
                    debug!(
                        session = %self.id,
                        version = installed.version,
                        action = ?action,
                        "committed document replacement"
                    );
                    return Ok(installed);
                }
                Err(CoreError::StaleWrite { .. }) => {
                    debug!(session = %self.id, "lost commit race, retrying on fresh snapshot");
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Validate and apply a settings edit, then record it in the audit
    /// trail. Settings are Super Admin territory.
    pub async fn update_setting(
        &self,
        key: &str,
        value: &str,
    ) -> Result<SettingChange, CoreError> {
        if !self.role.capabilities().can_access_settings {
            return Err(self.forbidden("change platform settings"));
        }
        self.simulate_latency().await;

        let change = self.lock_settings().set(key, value)?;
        loop {
            let base = self.store.snapshot();
            let ctx = self.context();
            let next = action::update_setting(&base.data, &ctx, &change);
            match self.store.commit(&base, next) {
                Ok(_) => return Ok(change),
                Err(CoreError::StaleWrite { .. }) => {}
                Err(other) => return Err(other),
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn context(&self) -> ActionContext<'_> {
        ActionContext {
            actor: self.actor(),
            now: Utc::now(),
            ids: &self.ids,
        }
    }

    fn authorize(&self, action: &Action) -> Result<(), CoreError> {
        let caps = self.role.capabilities();
        if matches!(action, Action::EmergencyBroadcast { .. }) {
            if !caps.can_access_settings {
                return Err(self.forbidden("send an emergency broadcast"));
            }
            return Ok(());
        }
        if !caps.can_mutate {
            return Err(self.forbidden("perform management actions"));
        }
        Ok(())
    }

    fn forbidden(&self, operation: &str) -> CoreError {
        CoreError::Forbidden {
            role: self.role.to_string(),
            operation: operation.to_string(),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn lock_settings(&self) -> std::sync::MutexGuard<'_, SystemSettings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::UserTransition;
    use crate::model::UserStatus;
    use crate::testutil::fixture_document;

    fn session(role: Role) -> Session {
        Session::new(fixture_document(), role)
    }

    #[tokio::test]
    async fn apply_commits_a_new_version() {
        let session = session(Role::SuperAdmin);
        let before = session.snapshot();

        let after = session
            .apply(&Action::UserStatus {
                user_id: "U002".to_string(),
                transition: UserTransition::Approve,
            })
            .await
            .unwrap();

        assert_eq!(after.version, before.version + 1);
        assert_eq!(after.data.user("U002").unwrap().status, UserStatus::Active);
        // The pre-mutation snapshot still shows the old document.
        assert_eq!(
            before.data.user("U002").unwrap().status,
            UserStatus::Pending
        );
    }

    #[tokio::test]
    async fn auditor_cannot_mutate() {
        let session = session(Role::Auditor);
        let err = session
            .apply(&Action::UserStatus {
                user_id: "U002".to_string(),
                transition: UserTransition::Approve,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden { .. }));
        assert_eq!(session.snapshot().version, 0);
    }

    #[tokio::test]
    async fn broadcast_needs_settings_access() {
        let session = session(Role::GroupAdmin);
        let err = session
            .apply(&Action::EmergencyBroadcast {
                message: "drill".to_string(),
                priority: crate::action::BroadcastPriority::High,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn settings_edit_is_gated_and_audited() {
        let super_admin = session(Role::SuperAdmin);
        let change = super_admin
            .update_setting("enable_mfa", "off")
            .await
            .unwrap();
        assert_eq!(change.key, "enable_mfa");
        assert!(!super_admin.settings().enable_mfa);
        assert_eq!(
            super_admin.snapshot().data.audit_logs[0].action,
            "Setting Updated"
        );

        let group_admin = session(Role::GroupAdmin);
        assert!(matches!(
            group_admin.update_setting("enable_mfa", "off").await,
            Err(CoreError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn sequential_applies_stack_on_one_document() {
        let session = session(Role::SuperAdmin);
        session
            .apply(&Action::ToggleQuarantine {
                device_id: "D001".to_string(),
            })
            .await
            .unwrap();
        let after = session
            .apply(&Action::UserStatus {
                user_id: "U001".to_string(),
                transition: UserTransition::Suspend,
            })
            .await
            .unwrap();

        assert_eq!(after.version, 2);
        // Both mutations and both audit entries are present.
        assert_eq!(after.data.audit_logs[0].action, "User suspended");
        assert_eq!(after.data.audit_logs[1].action, "Device Quarantine Toggle");
    }
}
