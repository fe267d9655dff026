use std::fmt;
use std::sync::Arc;

use crate::component::KindSet;
use crate::family::Family;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub u32);

pub type FamilyCallback = Arc<dyn Fn(&Arc<Family>) + Send + Sync>;

/// A registered `(required kinds, action)` pair.
pub struct CallbackEntry {
    id: CallbackId,
    required: KindSet,
    callback: FamilyCallback,
}

impl CallbackEntry {
    pub fn new(id: CallbackId, required: KindSet, callback: FamilyCallback) -> Self {
        Self {
            id,
            required,
            callback,
        }
    }

    #[inline]
    pub fn id(&self) -> CallbackId {
        self.id
    }

    #[inline]
    pub fn required(&self) -> KindSet {
        self.required
    }

    #[inline]
    pub fn is_satisfied_by(&self, present: KindSet) -> bool {
        self.required.is_subset_of(present)
    }

    pub fn fire(&self, family: &Arc<Family>) {
        (self.callback)(family)
    }
}

impl fmt::Debug for CallbackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackEntry")
            .field("id", &self.id)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Callbacks a single family has not fired yet, in registration order.
///
/// Entries only ever leave the ledger, and leave it before they fire.
#[derive(Clone, Debug, Default)]
pub struct DependencyLedger {
    pending: Vec<Arc<CallbackEntry>>,
}

impl DependencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger seeded with a snapshot of the global callback list.
    pub fn from_entries(entries: &[Arc<CallbackEntry>]) -> Self {
        Self {
            pending: entries.to_vec(),
        }
    }

    pub fn push(&mut self, entry: Arc<CallbackEntry>) {
        self.pending.push(entry);
    }

    /// Removes and returns every entry satisfied by `present`, keeping order.
    pub fn take_satisfied(&mut self, present: KindSet) -> Vec<Arc<CallbackEntry>> {
        let (ready, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|e| e.is_satisfied_by(present));
        self.pending = waiting;
        ready
    }

    /// Removes and returns entry `id` if `present` satisfies it.
    pub fn take_if_satisfied(&mut self, id: CallbackId, present: KindSet) -> Option<Arc<CallbackEntry>> {
        let pos = self
            .pending
            .iter()
            .position(|e| e.id() == id && e.is_satisfied_by(present))?;
        Some(self.pending.remove(pos))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_ids(&self) -> impl Iterator<Item = CallbackId> + '_ {
        self.pending.iter().map(|e| e.id())
    }
}
