// src/dag/scheduler.rs

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::dag::registry::TaskRegistry;
use crate::dag::task::{Task, TaskName, TaskOutcome, TaskStatus};
use crate::dag::waitset::WaitSets;

/// A task handed to a dispatch, together with the outcomes of its direct
/// dependencies at the moment it became ready.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub task: Task,
    pub upstream: BTreeMap<TaskName, TaskOutcome>,
    /// 1-based index of the wave this task belongs to.
    pub wave: usize,
}

impl ScheduledTask {
    /// Direct dependencies that finished with `Failed`.
    pub fn failed_dependencies(&self) -> Vec<&str> {
        self.upstream
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// All tasks dispatched together between two barriers.
#[derive(Debug, Clone)]
pub struct Wave {
    pub index: usize,
    pub tasks: Vec<ScheduledTask>,
}

impl Wave {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn names(&self) -> Vec<TaskName> {
        self.tasks.iter().map(|t| t.task.name.clone()).collect()
    }
}

/// Pure wave scheduling state machine.
///
/// Owns the registry and the wait-set map exclusively. It never runs
/// anything itself: [`start_wave`] hands out the ready tasks and
/// [`finish`] takes them back once their dispatch is done. The async shell
/// in [`crate::engine::Runtime`] drives it.
///
/// [`start_wave`]: WaveScheduler::start_wave
/// [`finish`]: WaveScheduler::finish
#[derive(Debug)]
pub struct WaveScheduler {
    registry: TaskRegistry,
    waitsets: WaitSets,
    waves_started: usize,
}

impl WaveScheduler {
    pub fn new(registry: TaskRegistry, waitsets: WaitSets) -> Self {
        Self {
            registry,
            waitsets,
            waves_started: 0,
        }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn waitsets(&self) -> &WaitSets {
        &self.waitsets
    }

    pub fn waves_started(&self) -> usize {
        self.waves_started
    }

    /// Tasks whose wait-set is empty and which have not been dispatched,
    /// in input order.
    pub fn ready_tasks(&self) -> Vec<TaskName> {
        self.registry
            .iter()
            .filter(|task| task.status() == TaskStatus::Pending && self.waitsets.is_clear(&task.name))
            .map(|task| task.name.clone())
            .collect()
    }

    /// Collect the ready set, mark each task started and move it out of the
    /// registry. Returns an empty wave if nothing is ready.
    pub fn start_wave(&mut self) -> Wave {
        let ready = self.ready_tasks();
        if ready.is_empty() {
            return Wave {
                index: self.waves_started,
                tasks: Vec::new(),
            };
        }

        self.waves_started += 1;
        let index = self.waves_started;

        let mut tasks = Vec::with_capacity(ready.len());
        for name in ready {
            let Some(mut task) = self.registry.take(&name) else {
                continue;
            };

            let upstream = self.upstream_outcomes(&task);
            task.mark_started();
            debug!(task = %task.name, wave = index, "task ready; marking Started");

            tasks.push(ScheduledTask {
                task,
                upstream,
                wave: index,
            });
        }

        Wave { index, tasks }
    }

    /// Take back a task whose dispatch completed and advance the graph.
    pub fn finish(&mut self, mut task: Task) {
        if !task.is_finished() {
            warn!(
                task = %task.name,
                "dispatch returned an unfinished task; recording it as failed"
            );
            task.finish(TaskOutcome::Failed, String::new());
        }

        self.waitsets.remove_finished(&task.name);
        self.registry.restore(task);
    }

    /// Every task has finished and none is in flight.
    pub fn is_done(&self) -> bool {
        self.registry.all_finished()
    }

    /// Names of tasks not yet finished (including in-flight ones).
    pub fn unfinished_tasks(&self) -> Vec<TaskName> {
        self.registry
            .names()
            .filter(|name| !self.registry.get(name).is_some_and(Task::is_finished))
            .map(str::to_string)
            .collect()
    }

    /// Static wave layout from the current state: each inner vector is one
    /// wave, computed as if every task finished in the wave it started.
    pub fn plan(&self) -> Vec<Vec<TaskName>> {
        let mut waits = self.waitsets.clone();
        let mut waves = Vec::new();

        loop {
            let wave: Vec<TaskName> = self
                .registry
                .iter()
                .filter(|task| task.status() == TaskStatus::Pending && waits.is_clear(&task.name))
                .map(|task| task.name.clone())
                .collect();

            if wave.is_empty() {
                break;
            }
            for name in &wave {
                waits.remove_finished(name);
            }
            waves.push(wave);
        }

        waves
    }

    /// Hand the registry to the reporter.
    pub fn into_registry(self) -> TaskRegistry {
        info!(waves = self.waves_started, "scheduler finished");
        self.registry
    }

    fn upstream_outcomes(&self, task: &Task) -> BTreeMap<TaskName, TaskOutcome> {
        let mut upstream = BTreeMap::new();
        for dep in &task.dependencies {
            match self.registry.get(dep).and_then(Task::outcome) {
                Some(outcome) => {
                    upstream.insert(dep.clone(), outcome);
                }
                None => {
                    warn!(
                        task = %task.name,
                        dep = %dep,
                        "dependency has no recorded outcome; treating it as failed"
                    );
                    upstream.insert(dep.clone(), TaskOutcome::Failed);
                }
            }
        }
        upstream
    }
}
