// src/engine/dispatch.rs

//! Per-task dispatch: check direct dependencies, then run or skip.

use tracing::{info, warn};

use crate::dag::{ScheduledTask, Task, TaskOutcome};
use crate::exec::ExecutorBackend;

/// Process one started task exactly once and return it finished.
///
/// If any direct dependency failed, the task is marked `Failed` with empty
/// output and the executor is never called. Failure therefore moves one
/// hop per wave: the skipped task is itself a failed direct dependency of
/// whatever becomes ready after it.
pub async fn dispatch<E>(scheduled: ScheduledTask, executor: &E) -> Task
where
    E: ExecutorBackend + ?Sized,
{
    let failed_deps: Vec<String> = scheduled
        .failed_dependencies()
        .into_iter()
        .map(str::to_string)
        .collect();
    let ScheduledTask { mut task, wave, .. } = scheduled;

    if !failed_deps.is_empty() {
        warn!(
            task = %task.name,
            wave,
            failed_deps = ?failed_deps,
            "skipping task (failed dependencies)"
        );
        task.finish(TaskOutcome::Failed, String::new());
        return task;
    }

    info!(task = %task.name, wave, kind = %task.kind, "started task");
    let execution = executor.execute(&task).await;
    info!(
        task = %task.name,
        wave,
        outcome = %execution.outcome,
        "ended task"
    );

    task.finish(execution.outcome, execution.output);
    task
}
