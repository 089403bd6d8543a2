// src/dag/registry.rs

use std::collections::{HashMap, HashSet};

use crate::dag::task::{Task, TaskName};
use crate::errors::{Result, WavedagError};

/// All tasks of one run, keyed by name, remembering input order.
///
/// While a wave is in flight its tasks are moved out (see [`take`]) and
/// handed to their dispatches; they come back through [`restore`].
///
/// [`take`]: TaskRegistry::take
/// [`restore`]: TaskRegistry::restore
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    order: Vec<TaskName>,
    // Every registered name, present or taken.
    known: HashSet<TaskName>,
    tasks: HashMap<TaskName, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Fails with `DuplicateTask` if the name is already known.
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if !self.known.insert(task.name.clone()) {
            return Err(WavedagError::DuplicateTask(task.name));
        }
        self.order.push(task.name.clone());
        self.tasks.insert(task.name.clone(), task);
        Ok(())
    }

    /// Whether `name` belongs to this registry (including tasks currently
    /// taken by a dispatch).
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.get_mut(name)
    }

    /// Number of tasks, including those currently taken.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Task names in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Present tasks in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|name| self.tasks.get(name))
    }

    /// Number of tasks currently moved out to dispatches.
    pub fn in_flight(&self) -> usize {
        self.order.len() - self.tasks.len()
    }

    /// Move a task out for exclusive use by a dispatch.
    pub(crate) fn take(&mut self, name: &str) -> Option<Task> {
        self.tasks.remove(name)
    }

    /// Put a task back after its dispatch returned it.
    pub(crate) fn restore(&mut self, task: Task) {
        self.tasks.insert(task.name.clone(), task);
    }

    /// Keep only the tasks for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.order.retain(|name| keep(name));
        self.known = self.order.iter().cloned().collect();
        let known = &self.known;
        self.tasks.retain(|name, _| known.contains(name));
    }

    pub fn all_finished(&self) -> bool {
        self.in_flight() == 0 && self.tasks.values().all(Task::is_finished)
    }
}
