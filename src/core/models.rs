//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! fixtures, invocation requests, raw process outcomes and classified results.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 测试夹具、调用请求、原始进程结果以及分类后的测试结果。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The default per-test time budget.
/// 每个测试的默认时间预算。
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One test case: a source file fed to the program under test, plus
/// optional extra arguments appended to the invocation.
///
/// 一个测试用例：提供给被测程序的源文件，以及附加到调用上的可选参数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Path of the test file. Must be a regular file at execution time.
    /// 测试文件路径。执行时必须是一个普通文件。
    pub path: PathBuf,
    /// Display name, the basename of `path`.
    /// 显示名称，即 `path` 的文件名部分。
    pub name: String,
    /// Arguments passed after the test path.
    /// 在测试路径之后传递的参数。
    #[serde(default)]
    pub args: Vec<String>,
    /// If set, the fixture is reported as IGNORE without being executed.
    /// 如果设置，该夹具将被报告为 IGNORE 而不会执行。
    #[serde(default)]
    pub ignore: bool,
}

impl Fixture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            path,
            name,
            args: Vec::new(),
            ignore: false,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the fixture as skipped.
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Loads the fixture's input. The file is read fully and must be valid UTF-8.
    /// 读取夹具的输入。文件被完整读取，且必须是有效的 UTF-8。
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(text.into_bytes())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Describes a single invocation of the program under test.
/// 描述对被测程序的一次调用。
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub program_path: PathBuf,
    pub fixture: Fixture,
    pub timeout: Duration,
}

impl InvocationRequest {
    pub fn new(program_path: impl Into<PathBuf>, fixture: Fixture) -> Self {
        Self {
            program_path: program_path.into(),
            fixture,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The unclassified result of running one process.
/// 运行单个进程的未分类结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutcome {
    /// The process terminated on its own.
    /// 进程自行终止。
    Completed {
        /// Exit code; `-N` when killed by signal `N`.
        exit_code: i32,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        /// Whether either stream exceeded the capture limit.
        /// 是否有任一输出流超过了捕获上限。
        output_truncated: bool,
    },
    /// The process exceeded its time budget and was killed.
    /// 进程超出了时间预算并被终止。
    TimedOut { elapsed: Duration },
    /// The OS refused to start the process.
    /// 操作系统拒绝启动该进程。
    LaunchFailed { reason: String },
}

/// Verdict categories, listed in reporting precedence.
/// 判定类别，按报告优先级排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Error,
    Ignore,
}

impl TestStatus {
    /// The fixed label used by the console reporter.
    pub fn label(self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Error => "ERROR",
            TestStatus::Ignore => "IGNORE",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The classified, user-facing verdict for one fixture.
///
/// A result holds exactly one status. The executor decides it in the order
/// ignored, errored, failed, passed, so the first matching category wins.
///
/// 单个夹具的分类结果。
/// 每个结果只有一个状态。执行器按照 忽略、错误、失败、通过 的顺序判定，
/// 因此第一个匹配的类别生效。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    /// Explanation for non-passing results.
    /// 非通过结果的说明。
    pub detail: Option<String>,
    /// Wall-clock time spent on the invocation; zero when nothing was run.
    /// 调用所花费的时间；未运行时为零。
    #[serde(default)]
    pub duration: Duration,
}

impl TestResult {
    fn with_status(name: impl Into<String>, status: TestStatus, detail: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            detail,
            duration: Duration::ZERO,
        }
    }

    pub fn passed(name: impl Into<String>) -> Self {
        Self::with_status(name, TestStatus::Pass, None)
    }

    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::with_status(name, TestStatus::Fail, Some(detail.into()))
    }

    pub fn error(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::with_status(name, TestStatus::Error, Some(detail.into()))
    }

    pub fn ignored(name: impl Into<String>) -> Self {
        Self::with_status(name, TestStatus::Ignore, None)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }

    /// FAIL and ERROR count against the run; PASS and IGNORE do not.
    /// FAIL 和 ERROR 计为失败；PASS 和 IGNORE 不计。
    pub fn is_failure(&self) -> bool {
        matches!(self.status, TestStatus::Fail | TestStatus::Error)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::reporting::console::Reporter::plain().render(self))
    }
}

/// Aggregated counts over a batch of results.
/// 一批结果的汇总计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub ignored: usize,
}

impl Summary {
    pub fn from_results(results: &[TestResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            match result.status {
                TestStatus::Pass => summary.passed += 1,
                TestStatus::Fail => summary.failed += 1,
                TestStatus::Error => summary.errors += 1,
                TestStatus::Ignore => summary.ignored += 1,
            }
            summary
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed + self.errors > 0
    }
}
