//! # Scheduler Module / 调度模块
//!
//! Fans a batch of fixtures out over a bounded number of concurrent
//! invocations and collects exactly one result per fixture.
//!
//! 将一批测试夹具分发到有限数量的并发调用上，并为每个夹具收集恰好一个结果。

use anyhow::{Context, Result};
use futures::{StreamExt, stream};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::core::{
    execution::{ExecutionOptions, execute},
    models::{DEFAULT_TIMEOUT, Fixture, InvocationRequest, TestResult},
};

/// Default number of invocations allowed to run at once.
/// 默认允许同时运行的调用数量。
pub const DEFAULT_JOBS: usize = 2;

/// Runs fixtures against one program with bounded concurrency.
///
/// Results come back in completion order, not submission order.
///
/// 以有限并发对同一个程序运行多个测试夹具。结果按完成顺序返回，而非提交顺序。
#[derive(Debug, Clone)]
pub struct TestRunner {
    program: PathBuf,
    jobs: usize,
    timeout: Duration,
    options: ExecutionOptions,
}

impl TestRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            jobs: DEFAULT_JOBS,
            timeout: DEFAULT_TIMEOUT,
            options: ExecutionOptions::default(),
        }
    }

    /// Sets the pool width. Zero is treated as one.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Executes every fixture and waits for all of them.
    ///
    /// Each fixture runs on its own task. A panic while handling one fixture
    /// is turned into an `ERROR` result for that fixture and does not disturb
    /// the others; `FAIL` and `ERROR` results never stop the batch.
    ///
    /// 执行所有测试夹具并等待全部完成。
    /// 每个夹具在独立的任务中运行。处理某个夹具时发生的 panic 会转换为该夹具的
    /// `ERROR` 结果，不影响其他夹具；`FAIL` 和 `ERROR` 结果不会中止整批运行。
    pub async fn run(&self, fixtures: Vec<Fixture>) -> Vec<TestResult> {
        let total = fixtures.len();
        info!(
            "Running {} test(s) with {} worker(s) against {}",
            total,
            self.jobs,
            self.program.display()
        );
        let start_time = Instant::now();

        let results: Vec<TestResult> = stream::iter(fixtures.into_iter().map(|fixture| {
            let name = fixture.name.clone();
            let request =
                InvocationRequest::new(self.program.clone(), fixture).with_timeout(self.timeout);
            let options = self.options.clone();

            async move {
                let handle = tokio::spawn(async move { execute(&request, &options).await });
                match handle.await {
                    Ok(result) => result,
                    Err(e) => TestResult::error(
                        name,
                        format!("Internal error while running test: {e}"),
                    ),
                }
            }
        }))
        .buffer_unordered(self.jobs)
        .inspect(|result| debug!("Finished {}: {}", result.name, result.status))
        .collect()
        .await;

        info!(
            "Finished {} test(s) in {:.2?}",
            results.len(),
            start_time.elapsed()
        );
        results
    }

    /// Same as [`TestRunner::run`], for callers without an async runtime.
    /// 与 [`TestRunner::run`] 相同，供没有异步运行时的调用方使用。
    pub fn run_blocking(&self, fixtures: Vec<Fixture>) -> Result<Vec<TestResult>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        Ok(runtime.block_on(self.run(fixtures)))
    }
}
