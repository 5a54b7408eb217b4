//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the runner,
//! including process execution, file system operations and logging.
//!
//! 此模块为运行器提供基础设施服务，
//! 包括进程执行、文件系统操作和日志。

pub mod command;
pub mod fs;
pub mod logging;
