//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as discovering fixture files and resolving paths.
//!
//! 此模块提供文件系统操作的实用功能，如发现测试夹具文件和解析路径。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collects files under `dir` whose extension is `extension`.
/// A missing directory yields an empty list. The result is sorted by path.
///
/// 递归收集 `dir` 下扩展名为 `extension` 的文件。目录不存在时返回空列表。结果按路径排序。
///
/// # Arguments
/// * `dir` - Directory to walk
/// * `extension` - File extension to match, without the leading dot
pub fn discover_tests(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !is_directory(dir) {
        tracing::warn!("Test directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut tests = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(extension)
        {
            tests.push(path.to_path_buf());
        }
    }
    tests.sort();

    tracing::debug!("Discovered {} test(s) in {}", tests.len(), dir.display());
    Ok(tests)
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Expands `~` and environment variables in a user-supplied path.
/// 展开用户提供的路径中的 `~` 和环境变量。
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
