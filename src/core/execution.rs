//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module runs a single invocation request: it checks preconditions,
//! launches the program under test with the fixture on stdin, enforces the
//! timeout and classifies what happened.
//!
//! 此模块运行单个调用请求：检查前置条件，以夹具内容作为标准输入启动被测程序，
//! 强制执行超时并对结果进行分类。

use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{
    core::models::{Fixture, InvocationRequest, RawOutcome, TestResult},
    infra::command::{self, DEFAULT_OUTPUT_LIMIT},
};

/// Exit code that counts as a pass.
/// 视为通过的退出码。
pub const EXIT_SUCCESS: i32 = 0;

/// Knobs that apply to every invocation of a run.
/// 适用于一次运行中每个调用的选项。
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum bytes captured from each of stdout and stderr.
    /// 从 stdout 和 stderr 各自捕获的最大字节数。
    pub output_limit: usize,
    /// Print the program's stdout as a debugging aid.
    /// 打印程序的 stdout 作为调试辅助。
    pub echo_output: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            output_limit: DEFAULT_OUTPUT_LIMIT,
            echo_output: true,
        }
    }
}

/// Runs one request to completion and returns its verdict.
///
/// Never fails: setup problems, launch errors and timeouts are all reported
/// as `ERROR` results, and a non-zero exit is a `FAIL`.
///
/// 运行单个请求直到完成并返回其判定结果。
/// 永不失败：设置问题、启动错误和超时都以 `ERROR` 结果报告，非零退出码为 `FAIL`。
///
/// # Arguments
/// * `request` - The program, fixture and time budget to run
/// * `options` - Capture and echo settings shared by the run
///
/// # Returns
/// A `TestResult` carrying the fixture name, status and duration
pub async fn execute(request: &InvocationRequest, options: &ExecutionOptions) -> TestResult {
    let fixture = &request.fixture;

    if fixture.ignore {
        debug!("Ignoring {}", fixture.name);
        return TestResult::ignored(&fixture.name);
    }

    if !request.program_path.exists() {
        return TestResult::error(
            &fixture.name,
            format!("Program file not found: {}", request.program_path.display()),
        );
    }

    if !fixture.path.is_file() {
        return TestResult::error(
            &fixture.name,
            format!("Test file not found: {}", fixture.path.display()),
        );
    }

    let input = match fixture.read().await {
        Ok(input) => input,
        Err(e) => {
            return TestResult::error(
                &fixture.name,
                format!("Failed to read test file {}: {}", fixture.path.display(), e),
            );
        }
    };

    let mut cmd = Command::new(&request.program_path);
    cmd.arg(&fixture.path).args(&fixture.args);

    debug!(
        program = %request.program_path.display(),
        test = %fixture.path.display(),
        args = ?fixture.args,
        "Running test"
    );

    let start_time = Instant::now();
    let outcome =
        command::run_with_timeout(cmd, input, request.timeout, options.output_limit).await;
    let duration = start_time.elapsed();

    let result = match outcome {
        RawOutcome::Completed {
            exit_code,
            stdout,
            stderr,
            ..
        } => {
            if options.echo_output {
                let output = String::from_utf8_lossy(&stdout);
                if !output.trim().is_empty() {
                    println!("{}", output.trim());
                }
            }
            verify(fixture, exit_code, &stdout, &stderr)
        }
        RawOutcome::TimedOut { elapsed } => {
            warn!("{} timed out after {:.2?}", fixture.name, elapsed);
            TestResult::error(
                &fixture.name,
                format!(
                    "Timed out after {:.2?} (limit {:?})",
                    elapsed, request.timeout
                ),
            )
        }
        RawOutcome::LaunchFailed { reason } => TestResult::error(
            &fixture.name,
            format!(
                "Failed to launch {}: {}",
                request.program_path.display(),
                reason
            ),
        ),
    };

    result.with_duration(duration)
}

/// Classifies a completed invocation.
///
/// A test passes if and only if the program exited with [`EXIT_SUCCESS`].
/// Output is not compared; it is only logged when the test fails.
///
/// 对已完成的调用进行分类。
/// 当且仅当程序以 [`EXIT_SUCCESS`] 退出时测试通过。不比较输出，仅在失败时记录日志。
pub fn verify(fixture: &Fixture, exit_code: i32, stdout: &[u8], stderr: &[u8]) -> TestResult {
    if exit_code == EXIT_SUCCESS {
        return TestResult::passed(&fixture.name);
    }

    debug!(
        test = %fixture.name,
        stdout_bytes = stdout.len(),
        stderr = %String::from_utf8_lossy(stderr).trim(),
        "Test exited with code {}",
        exit_code
    );
    TestResult::failed(
        &fixture.name,
        format!("Expected return code {EXIT_SUCCESS}, got {exit_code}"),
    )
}
