// src/dag/waitset.rs

use std::collections::{BTreeSet, HashMap};

use crate::dag::task::TaskName;

/// Remaining dependency names per task.
///
/// An empty entry means every dependency has finished. The entry of a
/// finished task is deleted, so `is_clear` on it is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitSets {
    entries: HashMap<TaskName, BTreeSet<TaskName>>,
}

impl WaitSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: TaskName, waiting_on: BTreeSet<TaskName>) {
        self.entries.insert(name, waiting_on);
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<TaskName>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entry exists and has nothing left to wait on.
    pub fn is_clear(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(BTreeSet::is_empty)
    }

    /// A task finished (any outcome): drop it from every other entry and
    /// delete its own.
    pub fn remove_finished(&mut self, name: &str) {
        for waiting_on in self.entries.values_mut() {
            waiting_on.remove(name);
        }
        self.entries.remove(name);
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|name, _| keep(name));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskName, &BTreeSet<TaskName>)> {
        self.entries.iter()
    }
}
