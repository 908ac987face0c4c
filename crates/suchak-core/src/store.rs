// ── Versioned document store ──
//
// One lock-free cell holding the current document snapshot. Mutations
// are whole-document replacements: build a new document from a
// snapshot, then commit it against that snapshot. A commit whose base
// is no longer current is rejected with `StaleWrite`, which is what
// lets concurrent actions serialize without losing updates.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::CoreError;
use crate::model::AdminData;

/// An immutable, versioned view of the document.
#[derive(Debug)]
pub struct Snapshot {
    pub version: u64,
    pub data: AdminData,
}

/// The session's document cell.
#[derive(Debug)]
pub struct Store {
    current: ArcSwap<Snapshot>,
}

impl Store {
    pub fn new(data: AdminData) -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot { version: 0, data }),
        }
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the document, provided `base` is still the current
    /// snapshot. On success returns the newly installed snapshot; on a
    /// concurrent commit returns [`CoreError::StaleWrite`] and leaves
    /// the store untouched.
    pub fn commit(&self, base: &Arc<Snapshot>, data: AdminData) -> Result<Arc<Snapshot>, CoreError> {
        let next = Arc::new(Snapshot {
            version: base.version + 1,
            data,
        });
        let previous = self.current.compare_and_swap(base, Arc::clone(&next));
        if Arc::ptr_eq(&previous, base) {
            Ok(next)
        } else {
            Err(CoreError::StaleWrite {
                expected: base.version,
                actual: previous.version,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testutil::fixture_document;

    #[test]
    fn commit_bumps_version() {
        let store = Store::new(fixture_document());
        let base = store.snapshot();
        assert_eq!(base.version, 0);

        let next = store.commit(&base, base.data.clone()).unwrap();
        assert_eq!(next.version, 1);
        assert_eq!(store.snapshot().version, 1);
    }

    #[test]
    fn stale_commit_is_rejected() {
        let store = Store::new(fixture_document());
        let base = store.snapshot();

        // A concurrent writer lands first.
        store.commit(&base, base.data.clone()).unwrap();

        let err = store.commit(&base, base.data.clone()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::StaleWrite {
                expected: 0,
                actual: 1
            }
        ));
        // The losing write must not have replaced anything.
        assert_eq!(store.snapshot().version, 1);
    }

    #[test]
    fn snapshots_are_immutable_views() {
        let store = Store::new(fixture_document());
        let before = store.snapshot();
        let user_count = before.data.users.len();

        let mut changed = before.data.clone();
        changed.users.clear();
        store.commit(&before, changed).unwrap();

        // The old snapshot still sees the pre-commit document.
        assert_eq!(before.data.users.len(), user_count);
        assert!(store.snapshot().data.users.is_empty());
    }
}
