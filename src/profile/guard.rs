use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Photo,
    Password,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Photo => f.write_str("photo update"),
            OperationKind::Password => f.write_str("password change"),
        }
    }
}

/// At most one in-flight operation per (staff, kind).
#[derive(Clone, Default)]
pub struct InFlightGuard {
    /// (staff_id, kind) -> ()
    entries: Arc<DashMap<(Uuid, OperationKind), ()>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot, or returns `None` if an operation of this kind is already running.
    pub fn try_begin(&self, staff_id: Uuid, kind: OperationKind) -> Option<InFlight> {
        let key = (staff_id, kind);
        match self.entries.entry(key) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlight {
                    entries: self.entries.clone(),
                    key,
                })
            }
        }
    }

    pub fn is_running(&self, staff_id: Uuid, kind: OperationKind) -> bool {
        self.entries.contains_key(&(staff_id, kind))
    }
}

/// Releases its slot when dropped.
pub struct InFlight {
    entries: Arc<DashMap<(Uuid, OperationKind), ()>>,
    key: (Uuid, OperationKind),
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.entries.remove(&self.key);
    }
}
