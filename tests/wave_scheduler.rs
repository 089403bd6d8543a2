// tests/wave_scheduler.rs
mod common;
use crate::common::builders::TaskListBuilder;
use crate::common::init_tracing;

use std::error::Error;

use wavedag::dag::{TaskOutcome, TaskStatus, Wave, WaveScheduler};
use wavedag::prepare;
use wavedag::report::render_plan;

type TestResult = Result<(), Box<dyn Error>>;

/// a -> b -> d, a -> c -> d, plus an independent e.
fn diamond() -> Result<WaveScheduler, Box<dyn Error>> {
    let specs = TaskListBuilder::new()
        .exec("a", "echo a", &[])
        .exec("b", "echo b", &["a"])
        .exec("c", "echo c", &["a"])
        .exec("d", "echo d", &["b", "c"])
        .exec("e", "echo e", &[])
        .build();
    Ok(prepare(&specs, &[])?)
}

/// Complete every task of a wave with the given outcome, the way a dispatch
/// would for tasks whose dependencies all succeeded.
fn complete_wave(scheduler: &mut WaveScheduler, wave: Wave, outcome: TaskOutcome) {
    for scheduled in wave.tasks {
        let mut task = scheduled.task;
        task.finish(outcome, String::new());
        scheduler.finish(task);
    }
}

#[test]
fn tasks_without_dependencies_form_the_first_wave() -> TestResult {
    init_tracing();
    let mut scheduler = diamond()?;

    assert_eq!(scheduler.ready_tasks(), vec!["a", "e"]);

    let wave = scheduler.start_wave();
    assert_eq!(wave.index, 1);
    assert_eq!(wave.names(), vec!["a", "e"]);
    assert!(wave.tasks.iter().all(|t| t.task.status() == TaskStatus::Started));
    assert!(wave.tasks.iter().all(|t| t.upstream.is_empty()));
    Ok(())
}

#[test]
fn started_tasks_are_not_ready_again() -> TestResult {
    let mut scheduler = diamond()?;

    let _wave = scheduler.start_wave();
    assert!(scheduler.ready_tasks().is_empty());
    assert_eq!(scheduler.registry().in_flight(), 2);

    let empty = scheduler.start_wave();
    assert!(empty.is_empty());
    assert!(!scheduler.is_done());
    Ok(())
}

#[test]
fn finishing_a_wave_releases_dependents() -> TestResult {
    let mut scheduler = diamond()?;

    let wave = scheduler.start_wave();
    complete_wave(&mut scheduler, wave, TaskOutcome::Success);

    assert!(!scheduler.waitsets().contains("a"));
    assert!(!scheduler.waitsets().contains("e"));

    let wave = scheduler.start_wave();
    assert_eq!(wave.index, 2);
    assert_eq!(wave.names(), vec!["b", "c"]);
    for scheduled in &wave.tasks {
        assert_eq!(scheduled.upstream.get("a"), Some(&TaskOutcome::Success));
        assert!(scheduled.failed_dependencies().is_empty());
    }
    complete_wave(&mut scheduler, wave, TaskOutcome::Success);

    let wave = scheduler.start_wave();
    assert_eq!(wave.names(), vec!["d"]);
    complete_wave(&mut scheduler, wave, TaskOutcome::Success);

    assert!(scheduler.is_done());
    assert_eq!(scheduler.waves_started(), 3);
    assert!(scheduler.waitsets().is_empty());
    Ok(())
}

#[test]
fn failed_dependency_is_visible_to_dependents() -> TestResult {
    let mut scheduler = diamond()?;

    let wave = scheduler.start_wave();
    complete_wave(&mut scheduler, wave, TaskOutcome::Failed);

    // Failure does not hold back the graph: dependents become ready and
    // carry the failed outcome for the dispatcher to act on.
    let wave = scheduler.start_wave();
    assert_eq!(wave.names(), vec!["b", "c"]);
    for scheduled in &wave.tasks {
        assert_eq!(scheduled.failed_dependencies(), vec!["a"]);
    }
    Ok(())
}

#[test]
fn plan_matches_topological_levels() -> TestResult {
    let scheduler = diamond()?;

    let plan = scheduler.plan();
    assert_eq!(
        plan,
        vec![
            vec!["a".to_string(), "e".to_string()],
            vec!["b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ]
    );

    // Planning does not consume any state.
    assert_eq!(scheduler.ready_tasks(), vec!["a", "e"]);
    Ok(())
}

#[test]
fn unfinished_tasks_include_in_flight_ones() -> TestResult {
    let mut scheduler = diamond()?;

    let _wave = scheduler.start_wave();
    assert_eq!(scheduler.unfinished_tasks(), vec!["a", "b", "c", "d", "e"]);
    Ok(())
}

#[test]
fn finishing_an_unfinished_task_records_failure() -> TestResult {
    let mut scheduler = diamond()?;

    let wave = scheduler.start_wave();
    for scheduled in wave.tasks {
        scheduler.finish(scheduled.task);
    }

    let registry = scheduler.into_registry();
    assert_eq!(registry.get("a").and_then(|t| t.outcome()), Some(TaskOutcome::Failed));
    assert_eq!(registry.get("e").and_then(|t| t.outcome()), Some(TaskOutcome::Failed));
    Ok(())
}

#[test]
fn rendered_plan_lists_tasks_then_waves() -> TestResult {
    let scheduler = diamond()?;

    let plan = render_plan(&scheduler);

    assert!(plan.starts_with("About to run (5 tasks):"));
    assert!(plan.contains("  - d [exec]"));
    assert!(plan.contains("      dependencies: b, c"));
    assert!(plan.contains("  1: a, e\n"));
    assert!(plan.contains("  2: b, c\n"));
    assert!(plan.contains("  3: d\n"));
    Ok(())
}
