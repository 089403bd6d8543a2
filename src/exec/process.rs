// src/exec/process.rs

//! External-process execution strategy.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::dag::TaskOutcome;
use crate::exec::Execution;

/// Run `command_line` through the platform shell, wait for it to exit and
/// capture stdout and stderr in full.
///
/// Exit code zero is `Success`; anything else (including a spawn error) is
/// `Failed`. The returned output is stdout followed by stderr.
pub async fn run_command(task_name: &str, command_line: &str) -> Execution {
    match run_command_inner(task_name, command_line).await {
        Ok(execution) => execution,
        Err(err) => {
            error!(task = %task_name, error = %err, "task execution error");
            Execution::failed()
        }
    }
}

async fn run_command_inner(task_name: &str, command_line: &str) -> Result<Execution> {
    info!(task = %task_name, cmd = %command_line, "starting task process");

    let mut cmd = shell_command(command_line);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = cmd
        .output()
        .await
        .with_context(|| format!("running process for task '{task_name}'"))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let code = output.status.code().unwrap_or(-1);

    info!(
        task = %task_name,
        exit_code = code,
        success = output.status.success(),
        "task process exited"
    );
    if !stdout.is_empty() {
        debug!(task = %task_name, "stdout:\n{}", stdout);
    }
    if !stderr.is_empty() {
        debug!(task = %task_name, "stderr:\n{}", stderr);
    }

    let outcome = if output.status.success() {
        TaskOutcome::Success
    } else {
        TaskOutcome::Failed
    };

    let mut text = stdout.into_owned();
    text.push_str(&stderr);

    Ok(Execution {
        outcome,
        output: text,
    })
}

/// Build a shell command appropriate for the platform.
fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    }
}
