// tests/runtime_fake_executor.rs
mod common;
use crate::common::builders::TaskListBuilder;
use crate::common::{init_tracing, with_timeout, FakeExecutor};

use std::error::Error;
use std::time::Duration;

use wavedag::config::TaskSpec;
use wavedag::dag::{TaskOutcome, TaskStatus};
use wavedag::engine::Runtime;
use wavedag::errors::WavedagError;
use wavedag::prepare;
use wavedag::report::RunSummary;

type TestResult = Result<(), Box<dyn Error>>;

async fn run_with(specs: &[TaskSpec], explicit: &[&str], executor: FakeExecutor) -> Result<RunSummary, Box<dyn Error>> {
    let explicit: Vec<String> = explicit.iter().map(|s| s.to_string()).collect();
    let scheduler = prepare(specs, &explicit)?;
    let summary = with_timeout(Runtime::new(scheduler, executor).run()).await?;
    Ok(summary)
}

fn outcome_of(summary: &RunSummary, task: &str) -> Option<TaskOutcome> {
    summary.registry.get(task).and_then(|t| t.outcome())
}

#[tokio::test]
async fn every_task_finishes_in_dependency_order() -> TestResult {
    init_tracing();

    let specs = TaskListBuilder::new()
        .exec("A", "echo A", &[])
        .exec("B", "echo B", &["A"])
        .exec("C", "echo C", &["B"])
        .build();

    let executor = FakeExecutor::new();
    let summary = run_with(&specs, &[], executor.clone()).await?;

    assert_eq!(executor.executed(), vec!["A", "B", "C"]);
    assert_eq!(summary.waves.len(), 3);
    for task in summary.registry.iter() {
        assert_eq!(task.status(), TaskStatus::Finished);
        assert_eq!(task.outcome(), Some(TaskOutcome::Success));
        assert_eq!(task.output(), format!("{} ok", task.name));
    }
    Ok(())
}

#[tokio::test]
async fn failure_propagates_without_running_dependents() -> TestResult {
    init_tracing();

    // C depends on B, B depends on A; A fails.
    let specs = TaskListBuilder::new()
        .exec("A", "exit 1", &[])
        .exec("B", "echo B", &["A"])
        .exec("C", "echo C", &["B"])
        .build();

    let executor = FakeExecutor::new().failing("A");
    let summary = run_with(&specs, &[], executor.clone()).await?;

    assert_eq!(executor.executed(), vec!["A"]);
    assert_eq!(outcome_of(&summary, "A"), Some(TaskOutcome::Failed));
    assert_eq!(outcome_of(&summary, "B"), Some(TaskOutcome::Failed));
    assert_eq!(outcome_of(&summary, "C"), Some(TaskOutcome::Failed));

    // Skipped tasks carry no output.
    assert_eq!(summary.registry.get("B").map(|t| t.output()), Some(""));
    assert_eq!(summary.registry.get("C").map(|t| t.output()), Some(""));

    // Failure moves one hop per wave.
    assert_eq!(summary.wave_of("B"), Some(2));
    assert_eq!(summary.wave_of("C"), Some(3));
    Ok(())
}

#[tokio::test]
async fn failure_only_affects_dependents() -> TestResult {
    init_tracing();

    let specs = TaskListBuilder::new()
        .exec("bad", "false", &[])
        .exec("good", "true", &[])
        .exec("after_bad", "true", &["bad"])
        .exec("after_good", "true", &["good"])
        .exec("after_both", "true", &["bad", "good"])
        .build();

    let executor = FakeExecutor::new().failing("bad");
    let summary = run_with(&specs, &[], executor.clone()).await?;

    assert_eq!(outcome_of(&summary, "good"), Some(TaskOutcome::Success));
    assert_eq!(outcome_of(&summary, "after_good"), Some(TaskOutcome::Success));
    assert_eq!(outcome_of(&summary, "after_bad"), Some(TaskOutcome::Failed));
    assert_eq!(outcome_of(&summary, "after_both"), Some(TaskOutcome::Failed));

    assert!(executor.was_executed("after_good"));
    assert!(!executor.was_executed("after_bad"));
    assert!(!executor.was_executed("after_both"));
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 3);
    Ok(())
}

#[tokio::test]
async fn independent_tasks_share_a_wave_and_run_concurrently() -> TestResult {
    init_tracing();

    let specs = TaskListBuilder::new()
        .exec("left", "sleep 1", &[])
        .exec("right", "sleep 1", &[])
        .exec("join", "true", &["left", "right"])
        .build();

    let executor = FakeExecutor::new()
        .with_delay("left", Duration::from_millis(100))
        .with_delay("right", Duration::from_millis(100));
    let summary = run_with(&specs, &[], executor.clone()).await?;

    assert_eq!(summary.wave_of("left"), Some(1));
    assert_eq!(summary.wave_of("right"), Some(1));
    assert_eq!(summary.wave_of("join"), Some(2));
    assert_eq!(executor.max_concurrency(), 2);
    Ok(())
}

#[tokio::test]
async fn slow_task_holds_the_barrier() -> TestResult {
    init_tracing();

    // `quick_dep` is ready after wave 1 in terms of its own dependency, but
    // the next ready-scan only happens once `slow` has finished too.
    let specs = TaskListBuilder::new()
        .exec("slow", "sleep 1", &[])
        .exec("quick", "true", &[])
        .exec("quick_dep", "true", &["quick"])
        .build();

    let executor = FakeExecutor::new().with_delay("slow", Duration::from_millis(150));
    let summary = run_with(&specs, &[], executor.clone()).await?;

    assert_eq!(summary.waves[0], vec!["slow".to_string(), "quick".to_string()]);
    assert_eq!(summary.waves[1], vec!["quick_dep".to_string()]);
    assert_eq!(executor.executed().last().map(String::as_str), Some("quick_dep"));
    Ok(())
}

#[tokio::test]
async fn explicit_selection_runs_only_the_closure() -> TestResult {
    init_tracing();

    let specs = TaskListBuilder::new()
        .exec("compile", "make", &[])
        .exec("build", "make pkg", &["compile"])
        .exec("deploy", "make deploy", &["build"])
        .exec("lint", "make lint", &[])
        .build();

    let executor = FakeExecutor::new();
    let summary = run_with(&specs, &["deploy"], executor.clone()).await?;

    assert_eq!(executor.executed(), vec!["compile", "build", "deploy"]);
    assert_eq!(summary.registry.len(), 3);
    assert!(summary.registry.get("lint").is_none());
    Ok(())
}

#[tokio::test]
async fn fatal_errors_abort_before_anything_runs() -> TestResult {
    init_tracing();

    let duplicate = TaskListBuilder::new()
        .exec("build", "true", &[])
        .exec("build", "true", &[])
        .build();
    match prepare(&duplicate, &[]) {
        Err(WavedagError::DuplicateTask(name)) => assert_eq!(name, "build"),
        other => panic!("expected DuplicateTask, got {other:?}"),
    }

    let cyclic = TaskListBuilder::new()
        .exec("a", "true", &["b"])
        .exec("b", "true", &["a"])
        .build();
    assert!(matches!(
        prepare(&cyclic, &[]),
        Err(WavedagError::CyclicDependency(_))
    ));

    let executor = FakeExecutor::new();
    match run_with(&cyclic, &[], executor.clone()).await {
        Err(err) => assert!(matches!(
            err.downcast_ref::<WavedagError>(),
            Some(WavedagError::CyclicDependency(_))
        )),
        Ok(_) => panic!("cyclic graph must not run"),
    }
    assert!(executor.executed().is_empty());
    Ok(())
}
