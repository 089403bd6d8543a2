// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::dag::WaveScheduler;
use crate::errors::{Result, WavedagError};
use crate::exec::ExecutorBackend;
use crate::report::RunSummary;

use super::dispatch::dispatch;

/// Drives the [`WaveScheduler`] and delegates task bodies to an
/// `ExecutorBackend`.
///
/// All semantics live in the scheduler; this shell only spawns the
/// dispatches of a wave and waits for the whole wave before asking for the
/// next one.
pub struct Runtime<E: ExecutorBackend> {
    core: WaveScheduler,
    executor: Arc<E>,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(core: WaveScheduler, executor: E) -> Self {
        Self {
            core,
            executor: Arc::new(executor),
        }
    }

    /// Main wave loop.
    ///
    /// - Asks the core for the ready set and spawns one dispatch per task.
    /// - Joins every dispatch of the wave (the barrier) and hands each
    ///   finished task back to the core.
    /// - Stops once every task is finished.
    pub async fn run(mut self) -> Result<RunSummary> {
        let started = Instant::now();
        let mut waves = Vec::new();

        info!(tasks = self.core.registry().len(), "wavedag runtime started");

        while !self.core.is_done() {
            let wave = self.core.start_wave();
            if wave.is_empty() {
                return Err(WavedagError::SchedulerStalled(self.core.unfinished_tasks()));
            }

            let index = wave.index;
            let names = wave.names();
            info!(wave = index, tasks = ?names, "dispatching wave");

            let mut set = JoinSet::new();
            for scheduled in wave.tasks {
                let executor = Arc::clone(&self.executor);
                set.spawn(async move { dispatch(scheduled, executor.as_ref()).await });
            }

            while let Some(joined) = set.join_next().await {
                let task = joined.map_err(|err| anyhow!("task dispatch failed: {err}"))?;
                debug!(task = %task.name, wave = index, "dispatch returned");
                self.core.finish(task);
            }

            debug!(wave = index, "wave barrier reached");
            waves.push(names);
        }

        let elapsed = started.elapsed();
        info!(waves = waves.len(), ?elapsed, "runtime exiting");

        Ok(RunSummary {
            registry: self.core.into_registry(),
            waves,
            elapsed,
        })
    }
}
