//! # Reporting Module / 报告模块
//!
//! This module renders test results for people and machines: one colored
//! line per result on the console, plus an optional JSON report file.
//!
//! 此模块为人和机器渲染测试结果：控制台上每个结果一行彩色文本，以及可选的 JSON 报告文件。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{Reporter, print_results, print_summary};
pub use json::write_json_report;
