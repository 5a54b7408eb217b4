//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes a machine-readable report of a run for CI systems.
//!
//! 为 CI 系统写出一次运行的机器可读报告。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{Summary, TestResult, TestStatus};

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub program: String,
    #[serde(flatten)]
    pub summary: Summary,
    pub results: Vec<JsonResult<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonResult<'a> {
    pub name: &'a str,
    pub status: TestStatus,
    pub detail: Option<&'a str>,
    pub duration_ms: u128,
}

impl<'a> JsonReport<'a> {
    /// Results are sorted by name so reports diff cleanly between runs.
    /// 结果按名称排序，以便不同运行的报告可以清晰对比。
    pub fn new(program: &Path, results: &'a [TestResult]) -> Self {
        let mut entries: Vec<JsonResult<'a>> = results
            .iter()
            .map(|result| JsonResult {
                name: &result.name,
                status: result.status,
                detail: result.detail.as_deref(),
                duration_ms: result.duration.as_millis(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(b.name));

        Self {
            generated_at: Utc::now(),
            program: program.display().to_string(),
            summary: Summary::from_results(results),
            results: entries,
        }
    }
}

/// Serializes the run to pretty-printed JSON at `output_path`.
///
/// # Errors
/// Returns an error if the report cannot be serialized or written.
pub fn write_json_report(program: &Path, results: &[TestResult], output_path: &Path) -> Result<()> {
    let report = JsonReport::new(program, results);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;
    Ok(())
}
