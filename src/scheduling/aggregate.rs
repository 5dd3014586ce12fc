use super::{heat_level::HeatLevel, session::Participant, slot_key::SlotKey};
use std::collections::BTreeMap;

/// Per-slot availability counts and names derived from a list of participants.
///
/// Only slots with at least one available participant are present; names keep
/// the order in which participants joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    counts: BTreeMap<SlotKey, usize>,
    names: BTreeMap<SlotKey, Vec<String>>,
    /// Total participants aggregated, the heatmap maximum.
    participants: usize,
}

impl AggregateResult {
    /// Folds every participant's available slots into counts and name lists.
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut counts: BTreeMap<SlotKey, usize> = BTreeMap::new();
        let mut names: BTreeMap<SlotKey, Vec<String>> = BTreeMap::new();
        for p in participants {
            for key in p.availability().available_slots() {
                *counts.entry(*key).or_insert(0) += 1;
                names.entry(*key).or_default().push(p.name().to_string());
            }
        }
        Self { counts, names, participants: participants.len() }
    }

    pub fn count(&self, key: &SlotKey) -> usize { self.counts.get(key).copied().unwrap_or(0) }

    pub fn names(&self, key: &SlotKey) -> &[String] { self.names.get(key).map(Vec::as_slice).unwrap_or_default() }

    pub fn counts(&self) -> &BTreeMap<SlotKey, usize> { &self.counts }

    pub fn names_map(&self) -> &BTreeMap<SlotKey, Vec<String>> { &self.names }

    pub fn participant_count(&self) -> usize { self.participants }

    pub fn heat_level(&self, key: &SlotKey) -> HeatLevel { HeatLevel::classify(self.count(key), self.participants) }

    /// Slots where every participant is available, in key order.
    pub fn common_slots(&self) -> Vec<SlotKey> {
        if self.participants == 0 {
            return Vec::new();
        }
        self.counts.iter().filter(|(_, c)| **c == self.participants).map(|(k, _)| *k).collect()
    }
}
