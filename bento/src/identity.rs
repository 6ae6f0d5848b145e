#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use alloc::rc::Rc;

use crate::Component;

#[cfg(feature = "std")]
type SlotMap = HashMap<ComponentId, usize>;
#[cfg(not(feature = "std"))]
type SlotMap = BTreeMap<ComponentId, usize>;

/// The identity of a component instance: the address of its shared allocation.
///
/// Only meaningful while the instance is alive. Groups hold their children strongly, so
/// ids of attached children are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn of<C: Component + ?Sized>(component: &Rc<C>) -> Self {
        Self(Rc::as_ptr(component) as *const () as usize)
    }
}

/// Reverse index from component identity to its slot in the accordion.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdentityPositionMap {
    slots: SlotMap,
}

impl IdentityPositionMap {
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn get(&self, id: ComponentId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub(crate) fn contains(&self, id: ComponentId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Records `id` at `slot`, leaving every other mapping untouched.
    pub(crate) fn set(&mut self, id: ComponentId, slot: usize) {
        self.slots.insert(id, slot);
    }

    /// Records `id` at `slot` and bumps every mapping at or after `slot`.
    pub(crate) fn insert(&mut self, id: ComponentId, slot: usize) {
        debug_assert!(!self.contains(id), "IdentityPositionMap: duplicate id");
        for s in self.slots.values_mut() {
            if *s >= slot {
                *s += 1;
            }
        }
        self.slots.insert(id, slot);
    }

    /// Forgets `id` and shifts every later mapping down by one. Returns the old slot.
    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<usize> {
        let removed = self.slots.remove(&id)?;
        for s in self.slots.values_mut() {
            if *s > removed {
                *s -= 1;
            }
        }
        Some(removed)
    }

    /// Forgets `id` without renumbering; used when the slot is reused in place.
    pub(crate) fn forget(&mut self, id: ComponentId) -> Option<usize> {
        self.slots.remove(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
