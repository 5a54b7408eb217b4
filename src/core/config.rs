//! # Configuration Module / 配置模块
//!
//! Locates and parses the `lox.toml` project configuration. The configuration
//! supplies the root directory used to discover default fixtures, plus optional
//! runner settings.
//!
//! 定位并解析 `lox.toml` 项目配置。该配置提供用于发现默认测试夹具的根目录，
//! 以及可选的运行器设置。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed in each searched directory, in order.
/// 在每个搜索目录中依次探测的文件名。
pub const CONFIG_FILENAMES: [&str; 2] = ["lox.toml", ".lox.toml"];

/// How many nested config directories are followed before giving up.
/// 放弃之前跟随的嵌套配置目录层数。
pub const MAX_SEARCH_DEPTH: usize = 4;

/// The `[core]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoreSection {
    /// Project root; fixtures are discovered beneath it.
    /// 项目根目录；测试夹具在其下被发现。
    pub root_dir: PathBuf,
}

/// The optional `[runner]` table. Every key falls back to a built-in default.
/// 可选的 `[runner]` 表。每个键都会回退到内置默认值。
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RunnerSection {
    #[serde(default)]
    pub jobs: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub output_limit: Option<usize>,
    /// Directory holding the fixtures, relative to `root_dir`.
    /// 存放测试夹具的目录，相对于 `root_dir`。
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,
    /// Extension of fixture files, without the dot.
    /// 测试夹具文件的扩展名，不含点号。
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            jobs: None,
            timeout_secs: None,
            output_limit: None,
            test_dir: default_test_dir(),
            extension: default_extension(),
        }
    }
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("test").join("lox")
}

fn default_extension() -> String {
    "lox".to_string()
}

/// Represents the whole configuration file as written on disk.
/// 表示磁盘上的整个配置文件。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub core: CoreSection,
    #[serde(default)]
    pub runner: RunnerSection,
}

impl Config {
    /// Directory scanned for default fixtures.
    pub fn test_dir(&self) -> PathBuf {
        self.core.root_dir.join(&self.runner.test_dir)
    }
}

/// Parses a configuration file and resolves `root_dir`.
///
/// `~` and environment variables in `root_dir` are expanded. A relative
/// `root_dir` is joined onto `base_dir`, the directory the search started in.
///
/// 解析配置文件并解析 `root_dir`。
/// `root_dir` 中的 `~` 和环境变量会被展开。相对路径会拼接到 `base_dir`（搜索开始的目录）。
pub fn load_config(path: &Path, base_dir: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let raw_root = config.core.root_dir.to_string_lossy().into_owned();
    let expanded = shellexpand::full(&raw_root)
        .with_context(|| format!("Failed to expand root_dir: {raw_root}"))?;
    let root_dir = PathBuf::from(expanded.as_ref());
    config.core.root_dir = if root_dir.is_relative() {
        base_dir.join(root_dir)
    } else {
        root_dir
    };

    Ok(config)
}

/// Searches `dir` for a config file.
///
/// A candidate that is a directory is searched recursively, up to
/// [`MAX_SEARCH_DEPTH`] levels; going deeper is an error.
///
/// 在 `dir` 中搜索配置文件。若候选项是目录，则递归搜索，最多 [`MAX_SEARCH_DEPTH`] 层。
pub fn find_config_file(dir: &Path) -> Result<Option<PathBuf>> {
    search(dir, 0)
}

fn search(dir: &Path, depth: usize) -> Result<Option<PathBuf>> {
    if depth > MAX_SEARCH_DEPTH {
        bail!("max recursion depth exceeded while searching {}", dir.display());
    }
    for filename in CONFIG_FILENAMES {
        let path = dir.join(filename);
        if path.is_dir() {
            return search(&path, depth + 1);
        }
        if path.is_file() {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Finds and loads the configuration starting from `search_root`.
/// Returns `Ok(None)` when no config file exists.
///
/// 从 `search_root` 开始查找并加载配置。没有配置文件时返回 `Ok(None)`。
pub fn discover_config(search_root: &Path) -> Result<Option<Config>> {
    match find_config_file(search_root)? {
        Some(path) => {
            tracing::debug!("Using config file {}", path.display());
            load_config(&path, search_root).map(Some)
        }
        None => Ok(None),
    }
}
