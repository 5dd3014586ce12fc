use super::slot_key::SlotKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-participant mapping from slot to "is available".
///
/// The map is sparse: a missing key means "not available".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityMap {
    slots: BTreeMap<SlotKey, bool>,
}

impl AvailabilityMap {
    pub fn new() -> Self { Self::default() }

    pub fn is_available(&self, key: &SlotKey) -> bool { self.slots.get(key).copied().unwrap_or(false) }

    pub fn set(&mut self, key: SlotKey, available: bool) { self.slots.insert(key, available); }

    /// Flips the value stored for `key` and returns the new value.
    pub fn toggle(&mut self, key: SlotKey) -> bool {
        let new_val = !self.is_available(&key);
        self.set(key, new_val);
        new_val
    }

    /// Iterates over all slots explicitly marked as available.
    pub fn available_slots(&self) -> impl Iterator<Item = &SlotKey> {
        self.slots.iter().filter(|(_, v)| **v).map(|(k, _)| k)
    }

    pub fn available_count(&self) -> usize { self.available_slots().count() }

    /// Returns a copy holding only the entries accepted by `keep`.
    pub fn retained(&self, keep: impl Fn(&SlotKey) -> bool) -> Self {
        Self { slots: self.slots.iter().filter(|(k, _)| keep(k)).map(|(k, v)| (*k, *v)).collect() }
    }

    pub fn clear(&mut self) { self.slots.clear(); }

    pub fn is_empty(&self) -> bool { self.slots.is_empty() }
}

impl FromIterator<(SlotKey, bool)> for AvailabilityMap {
    fn from_iter<T: IntoIterator<Item = (SlotKey, bool)>>(iter: T) -> Self {
        Self { slots: iter.into_iter().collect() }
    }
}
