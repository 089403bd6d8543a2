// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, TaskSpec};
use crate::dag::{build, ensure_schedulable, filter_to_explicit, TaskName, WaveScheduler};
use crate::engine::Runtime;
use crate::exec::RealExecutorBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - task file loading
/// - graph construction, explicit selection and checks
/// - the wave runtime with the real executor
/// - plan and summary output
pub async fn run(args: CliArgs) -> Result<()> {
    let file = load_and_validate(&args.tasks_file)?;
    let scheduler = prepare(file.tasks(), &args.tasks)?;

    print!("{}", report::render_plan(&scheduler));

    if args.dry_run {
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    let executor = RealExecutorBackend::new(args.eval_workers());
    let summary = Runtime::new(scheduler, executor).run().await?;

    println!();
    print!("{}", report::render_summary(&summary, args.show_output));
    info!(
        ok = summary.succeeded(),
        failed = summary.failed(),
        "run complete"
    );
    Ok(())
}

/// Build, restrict and check the graph, returning a scheduler ready to run.
///
/// Every fatal configuration error surfaces here, before any task executes.
pub fn prepare(specs: &[TaskSpec], explicit: &[TaskName]) -> errors::Result<WaveScheduler> {
    let (registry, waitsets) = build(specs)?;
    let (registry, waitsets) = filter_to_explicit(registry, waitsets, explicit)?;
    ensure_schedulable(&registry)?;
    Ok(WaveScheduler::new(registry, waitsets))
}
