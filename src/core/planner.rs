//! # Test Execution Planner Module / 测试执行计划模块
//!
//! Turns the caller's inputs (an explicit list of test paths, or a
//! configuration to discover them from) into the fixtures handed to the runner.
//!
//! 将调用方的输入（显式的测试路径列表，或用于发现测试的配置）
//! 转换为交给运行器的测试夹具。

use anyhow::Result;
use std::path::PathBuf;

use crate::core::{config::Config, models::Fixture};
use crate::infra::fs::discover_tests;

/// Where the fixtures come from.
/// 测试夹具的来源。
#[derive(Debug)]
pub enum FixtureSource<'a> {
    /// Paths given on the command line, kept in the given order.
    /// 命令行给出的路径，保持给定顺序。
    Explicit(Vec<PathBuf>),
    /// Every matching file under the configured test directory.
    /// 配置的测试目录下所有匹配的文件。
    Discover(&'a Config),
}

/// Represents the fixtures selected for one run.
/// 表示一次运行所选择的测试夹具。
#[derive(Debug)]
pub struct TestPlan {
    pub fixtures: Vec<Fixture>,
    /// How many fixtures were marked as ignored by a skip pattern.
    /// 被跳过模式标记为忽略的夹具数量。
    pub ignored_count: usize,
    /// Whether the fixtures were discovered rather than listed explicitly.
    /// 夹具是否通过发现得到，而非显式列出。
    pub discovered: bool,
}

/// Builds the execution plan.
///
/// # Arguments
/// * `source` - Explicit paths or a config to discover from
/// * `skip` - Substrings; a fixture whose name contains one is ignored
/// * `args` - Extra arguments appended to every invocation
pub fn plan_fixtures(source: FixtureSource<'_>, skip: &[String], args: &[String]) -> Result<TestPlan> {
    let (paths, discovered) = match source {
        FixtureSource::Explicit(paths) => (paths, false),
        FixtureSource::Discover(config) => {
            let dir = config.test_dir();
            (discover_tests(&dir, &config.runner.extension)?, true)
        }
    };

    let fixtures: Vec<Fixture> = paths
        .into_iter()
        .map(|path| {
            let fixture = Fixture::new(path).with_args(args.iter().cloned());
            if skip.iter().any(|pattern| fixture.name.contains(pattern.as_str())) {
                fixture.ignored()
            } else {
                fixture
            }
        })
        .collect();

    let ignored_count = fixtures.iter().filter(|f| f.ignore).count();

    Ok(TestPlan {
        fixtures,
        ignored_count,
        discovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_keep_order_and_args() {
        let plan = plan_fixtures(
            FixtureSource::Explicit(vec!["b.lox".into(), "dir/a.lox".into()]),
            &[],
            &["--trace".to_string()],
        )
        .unwrap();

        assert!(!plan.discovered);
        let names: Vec<_> = plan.fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b.lox", "a.lox"]);
        assert!(plan.fixtures.iter().all(|f| f.args == ["--trace"]));
        assert_eq!(plan.ignored_count, 0);
    }

    #[test]
    fn skip_patterns_mark_fixtures_ignored() {
        let plan = plan_fixtures(
            FixtureSource::Explicit(vec!["closure.lox".into(), "class.lox".into()]),
            &["clos".to_string()],
            &[],
        )
        .unwrap();

        assert_eq!(plan.ignored_count, 1);
        assert!(plan.fixtures[0].ignore);
        assert!(!plan.fixtures[1].ignore);
    }
}
