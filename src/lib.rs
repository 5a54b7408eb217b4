//! # Lox Runner Library / Lox Runner 库
//!
//! This library provides the core functionality of the `lox` test tool,
//! a parallel conformance-test runner: it executes a program against a set of
//! test fixtures, enforces per-test timeouts, checks exit status and reports
//! categorized results.
//!
//! 此库为 `lox` 测试工具提供核心功能，这是一个并行一致性测试运行器：
//! 它针对一组测试夹具执行程序，强制执行每个测试的超时，检查退出状态并报告分类结果。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, execution engine, scheduler and configuration
//! - `infra` - Process spawning, file system helpers and logging setup
//! - `reporting` - Console rendering and JSON reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、执行引擎、调度器和配置
//! - `infra` - 进程派生、文件系统辅助功能和日志设置
//! - `reporting` - 控制台渲染和 JSON 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use self::core::config;
pub use self::core::execution;
pub use self::core::models;
pub use self::core::scheduler;
