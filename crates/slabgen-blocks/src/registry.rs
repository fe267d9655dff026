use std::sync::Arc;

use hashbrown::HashMap;

use crate::component::{Component, ComponentKind, KindSet};
use crate::family::Family;
use crate::ledger::{CallbackEntry, CallbackId, DependencyLedger};
use crate::types::{DiscoveredBlock, Identifier};

struct FamilyEntry {
    family: Arc<Family>,
    ledger: DependencyLedger,
}

/// All known families plus the global callback list.
///
/// Discovery order does not matter: every family receives every callback,
/// whether the callback was registered before or after the family appeared,
/// and each callback fires once per family as soon as its required kinds
/// are present. Callbacks run synchronously and must not call back into
/// the registry.
///
/// Every valid identity is at least a `Base` component, so callers that
/// feed generated blocks back in should filter their own namespace first.
#[derive(Default)]
pub struct FamilyRegistry {
    families: Vec<FamilyEntry>,
    by_id: HashMap<Identifier, usize>,
    callbacks: Vec<Arc<CallbackEntry>>,
    next_callback: u32,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovery entry point for a raw `namespace:path` identity.
    ///
    /// Malformed identities and identities no kind claims are skipped.
    pub fn on_discover(&mut self, raw: &str, block: DiscoveredBlock) -> Option<Arc<Family>> {
        match Identifier::parse(raw) {
            Ok(id) => self.discover(id, block),
            Err(e) => {
                log::trace!(target: "registry", "skipping {raw:?}: {e}");
                None
            }
        }
    }

    /// Classifies `id`, files the component under its family and fires any
    /// callbacks that became satisfied. Returns the family that was updated.
    ///
    /// Panics if the family already holds a component of the same kind.
    pub fn discover(&mut self, id: Identifier, block: DiscoveredBlock) -> Option<Arc<Family>> {
        let (kind, family_id) = ComponentKind::classify(&id, &block)?;
        let index = self.find_or_create(family_id);
        let entry = &mut self.families[index];
        let present = entry
            .family
            .add_component(kind, Component::new(id, block))
            .unwrap_or_else(|e| panic!("{}: {e}", entry.family.id()));
        log::trace!(target: "registry", "{} += {kind} -> {present:?}", entry.family.id());

        let ready = entry.ledger.take_satisfied(present);
        let family = Arc::clone(&entry.family);
        for callback in ready {
            log::debug!(target: "registry", "firing {:?} for {}", callback.id(), family.id());
            callback.fire(&family);
        }
        Some(family)
    }

    /// Registers `callback` to run once for every family, past and future,
    /// whose components cover `required`. Families that already qualify fire
    /// before this returns.
    pub fn register_callback<F>(&mut self, required: KindSet, callback: F) -> CallbackId
    where
        F: Fn(&Arc<Family>) + Send + Sync + 'static,
    {
        let id = CallbackId(self.next_callback);
        self.next_callback += 1;
        let entry = Arc::new(CallbackEntry::new(id, required, Arc::new(callback)));
        self.callbacks.push(Arc::clone(&entry));

        for fe in &mut self.families {
            fe.ledger.push(Arc::clone(&entry));
            if let Some(ready) = fe.ledger.take_if_satisfied(id, fe.family.kinds()) {
                log::debug!(target: "registry", "late fire {id:?} for {}", fe.family.id());
                ready.fire(&fe.family);
            }
        }
        id
    }

    pub fn find_by_id(&self, id: &Identifier) -> Option<Arc<Family>> {
        self.by_id
            .get(id)
            .map(|&i| Arc::clone(&self.families[i].family))
    }

    /// Visits families in creation order.
    pub fn for_each(&self, mut visitor: impl FnMut(&Arc<Family>)) {
        for fe in &self.families {
            visitor(&fe.family);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Family>> {
        self.families.iter().map(|fe| &fe.family)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    #[inline]
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Callbacks still waiting on `id`, or `None` for an unknown family.
    pub fn pending_count(&self, id: &Identifier) -> Option<usize> {
        self.by_id.get(id).map(|&i| self.families[i].ledger.len())
    }

    /// Drops all families and callbacks.
    pub fn reset(&mut self) {
        self.families.clear();
        self.by_id.clear();
        self.callbacks.clear();
        self.next_callback = 0;
    }

    fn find_or_create(&mut self, id: Identifier) -> usize {
        if let Some(&i) = self.by_id.get(&id) {
            return i;
        }
        log::debug!(target: "registry", "new family {id}");
        let index = self.families.len();
        self.by_id.insert(id.clone(), index);
        self.families.push(FamilyEntry {
            family: Arc::new(Family::new(id)),
            ledger: DependencyLedger::from_entries(&self.callbacks),
        });
        index
    }
}
