use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wavedag::dag::{Task, TaskOutcome};
use wavedag::exec::{Execution, ExecutorBackend};

#[derive(Default)]
struct FakeState {
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    executed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// A fake executor that:
/// - records which tasks were actually executed, in start order
/// - succeeds unless the task was registered with [`FakeExecutor::failing`]
/// - optionally sleeps per task, to make concurrency observable
///
/// Clones share state, so a test can keep one handle and give another to
/// the runtime.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<FakeState>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `task` fail when executed. Call before handing out clones.
    pub fn failing(mut self, task: &str) -> Self {
        Arc::get_mut(&mut self.state)
            .expect("configure FakeExecutor before cloning it")
            .failing
            .insert(task.to_string());
        self
    }

    /// Make `task` take `delay` to execute. Call before handing out clones.
    pub fn with_delay(mut self, task: &str, delay: Duration) -> Self {
        Arc::get_mut(&mut self.state)
            .expect("configure FakeExecutor before cloning it")
            .delays
            .insert(task.to_string(), delay);
        self
    }

    /// Names of executed tasks, in the order their bodies started.
    pub fn executed(&self) -> Vec<String> {
        self.state.executed.lock().unwrap().clone()
    }

    pub fn was_executed(&self, task: &str) -> bool {
        self.executed().iter().any(|name| name == task)
    }

    /// Highest number of task bodies observed running at the same time.
    pub fn max_concurrency(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute<'a>(&'a self, task: &'a Task) -> Pin<Box<dyn Future<Output = Execution> + Send + 'a>> {
        Box::pin(async move {
            let state = &self.state;
            state.executed.lock().unwrap().push(task.name.clone());

            let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            state.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = state.delays.get(&task.name) {
                tokio::time::sleep(*delay).await;
            }

            state.in_flight.fetch_sub(1, Ordering::SeqCst);

            if state.failing.contains(&task.name) {
                Execution {
                    outcome: TaskOutcome::Failed,
                    output: format!("{} failed", task.name),
                }
            } else {
                Execution {
                    outcome: TaskOutcome::Success,
                    output: format!("{} ok", task.name),
                }
            }
        })
    }
}
