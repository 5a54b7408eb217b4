//! # Console Reporting Module / 控制台报告模块
//!
//! This module renders test results as single console lines and prints a
//! colored summary of a run.
//!
//! 此模块将测试结果渲染为单行控制台文本，并打印一次运行的彩色摘要。

use colored::*;

use crate::core::models::{Summary, TestResult, TestStatus};

const ANSI_GREEN: &str = "\x1b[92m";
const ANSI_RED: &str = "\x1b[91m";
const ANSI_YELLOW: &str = "\x1b[93m";
const ANSI_RESET: &str = "\x1b[0m";

/// Width the status label is centered in.
/// 状态标签居中所用的宽度。
const LABEL_WIDTH: usize = 6;

/// Formats results as lines. Coloring is chosen per reporter, never globally.
///
/// 将结果格式化为文本行。是否着色由每个报告器决定，而非全局状态。
///
/// # Output Format / 输出格式
/// ```text
/// (  PASS  ) closure.lox
/// (  FAIL  ) class.lox Expected return code 0, got 65
/// ( ERROR  ) loop.lox Timed out after 10.00s (limit 10s)
/// ( IGNORE ) super.lox
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn colored() -> Self {
        Self::new(true)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Renders one result. Pure: the same input always gives the same line.
    /// 渲染单个结果。纯函数：相同输入总是得到相同的文本行。
    pub fn render(&self, result: &TestResult) -> String {
        let (color, reset) = if self.color {
            (status_color(result.status), ANSI_RESET)
        } else {
            ("", "")
        };
        let label = format!("{:^width$}", result.status.label(), width = LABEL_WIDTH);
        let mut line = format!("( {color}{label}{reset} ) {}", result.name);

        if result.status != TestStatus::Pass {
            if let Some(detail) = &result.detail {
                line.push(' ');
                line.push_str(detail);
            }
        }
        line
    }
}

fn status_color(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => ANSI_GREEN,
        TestStatus::Fail | TestStatus::Error => ANSI_RED,
        TestStatus::Ignore => ANSI_YELLOW,
    }
}

/// Prints each result on its own line.
pub fn print_results(results: &[TestResult], reporter: &Reporter) {
    for result in results {
        println!("{}", reporter.render(result));
    }
}

/// Formats the one-line summary of a run.
/// 格式化一次运行的单行摘要。
pub fn summary_line(summary: &Summary) -> String {
    format!(
        "{} passed, {} failed, {} errors, {} ignored (total {})",
        summary.passed, summary.failed, summary.errors, summary.ignored, summary.total
    )
}

/// Prints the summary line, green when nothing failed and red otherwise.
/// 打印摘要行；没有失败时为绿色，否则为红色。
pub fn print_summary(summary: &Summary, color: bool) {
    let line = summary_line(summary);
    if !color {
        println!("\n{}", line);
    } else if summary.has_failures() {
        println!("\n{}", line.red().bold());
    } else {
        println!("\n{}", line.green().bold());
    }
}
