//! Task runner
//!
//! Executes a group of build tasks sequentially or concurrently with
//! join/barrier semantics: `run` returns only after every dispatched task
//! has completed. Per-task result codes are aggregated into one run
//! result (0 iff every task returned 0); fatal conditions raised during a
//! task, such as an unresolvable executable, escalate instead of being
//! folded into the aggregate.

mod process;
mod task;


pub use process::{ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use task::{Invocation, Task};

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};

use crate::config::RunnerConfig;
use crate::context::Context;
use crate::error::Result;

/// A group of tasks together with its execution mode
#[derive(Debug)]
pub enum Run {
    /// Execute in submission order, one task at a time
    Sequential(Vec<Task>),
    /// Dispatch all tasks to the bounded worker pool
    Concurrent(Vec<Task>),
}

/// Drives groups of tasks and aggregates their result codes
pub struct TaskRunner {
    config: RunnerConfig,
    process: Arc<dyn ProcessRunner>,
}

impl TaskRunner {
    /// Runner with default configuration, executing invocations as real
    /// system processes
    pub fn new() -> Self {
        Self::with_runner(RunnerConfig::default(), Arc::new(SystemProcessRunner))
    }

    /// Runner with explicit configuration and process capability
    pub fn with_runner(config: RunnerConfig, process: Arc<dyn ProcessRunner>) -> Self {
        Self { config, process }
    }

    /// Run a group of tasks under `caption`
    ///
    /// Emits one `[run] <caption>...` line before the group and one
    /// `[run] <caption> done.` line after the join barrier; each task gets
    /// its own begin/done pair (done lines carry the wall-clock duration).
    /// Returns 0 iff every task returned 0, otherwise the number of
    /// failing tasks. A fatal condition inside any task aborts the run
    /// with that condition as its cause.
    pub async fn run(&self, ctx: &Context, caption: &str, run: Run) -> Result<i32> {
        ctx.log(format!("[run] {caption}..."));
        let failures = match run {
            Run::Sequential(tasks) => {
                let mut failures = 0;
                for task in tasks {
                    if self.execute_one(ctx, task).await? != 0 {
                        failures += 1;
                    }
                }
                failures
            }
            Run::Concurrent(tasks) => {
                let pool = self.config.max_concurrent_tasks.max(1);
                let results: Vec<Result<i32>> = stream::iter(tasks)
                    .map(|task| self.execute_one(ctx, task))
                    .buffer_unordered(pool)
                    .collect()
                    .await;
                let mut failures = 0;
                for result in results {
                    if result? != 0 {
                        failures += 1;
                    }
                }
                failures
            }
        };
        ctx.log(format!("[run] {caption} done."));
        if failures != 0 {
            tracing::warn!(caption, failures, "run finished with failing tasks");
        }
        Ok(failures)
    }

    /// Convenience: run a fixed set of tasks concurrently
    pub async fn run_all(&self, ctx: &Context, caption: &str, tasks: Vec<Task>) -> Result<i32> {
        self.run(ctx, caption, Run::Concurrent(tasks)).await
    }

    /// Convenience: run one task, captioned by itself
    pub async fn run_one(&self, ctx: &Context, task: Task) -> Result<i32> {
        let caption = task.caption().to_string();
        self.run(ctx, &caption, Run::Sequential(vec![task])).await
    }

    /// Convenience: run one task under an explicit caption
    pub async fn run_captioned(&self, ctx: &Context, caption: &str, task: Task) -> Result<i32> {
        self.run(ctx, caption, Run::Sequential(vec![task])).await
    }

    async fn execute_one(&self, ctx: &Context, task: Task) -> Result<i32> {
        let caption = task.caption().to_string();
        ctx.log(format!("{caption} begin"));
        let start = Instant::now();
        let code = task.execute(self.process.as_ref()).await?;
        let millis = start.elapsed().as_millis();
        ctx.log(format!("{caption} done. {millis} ms"));
        Ok(code)
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}
