//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the runner,
//! including data models, configuration, test execution and scheduling.
//!
//! 此模块包含运行器的核心功能，
//! 包括数据模型、配置、测试执行和调度。

pub mod config;
pub mod execution;
pub mod models;
pub mod planner;
pub mod scheduler;

// Re-exports
pub use execution::{execute, verify};
pub use models::{Fixture, InvocationRequest, RawOutcome, TestResult, TestStatus};
pub use scheduler::TestRunner;
