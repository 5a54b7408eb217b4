//! # Reporting Module Unit Tests / Reporting 模块单元测试
//!
//! Tests for console rendering and the JSON report.
//!
//! 测试控制台渲染和 JSON 报告。

use lox_runner::models::{Summary, TestResult};
use lox_runner::reporting::console::{Reporter, summary_line};
use lox_runner::reporting::json::write_json_report;
use std::path::Path;
use std::time::Duration;

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_render_plain_labels_are_centered() {
        let reporter = Reporter::plain();
        assert_eq!(
            reporter.render(&TestResult::passed("a.lox")),
            "(  PASS  ) a.lox"
        );
        assert_eq!(
            reporter.render(&TestResult::ignored("b.lox")),
            "( IGNORE ) b.lox"
        );
        assert_eq!(
            reporter.render(&TestResult::error("c.lox", "Test file not found: c.lox")),
            "( ERROR  ) c.lox Test file not found: c.lox"
        );
    }

    #[test]
    fn test_render_fail_includes_detail() {
        let line = Reporter::plain().render(&TestResult::failed(
            "c.test",
            "Expected return code 0, got 1",
        ));
        assert_eq!(line, "(  FAIL  ) c.test Expected return code 0, got 1");
    }

    #[test]
    fn test_render_colored() {
        let reporter = Reporter::colored();
        assert!(reporter.color_enabled());
        assert_eq!(
            reporter.render(&TestResult::passed("a.lox")),
            "( \x1b[92m PASS \x1b[0m ) a.lox"
        );
        assert_eq!(
            reporter.render(&TestResult::failed("b.lox", "boom")),
            "( \x1b[91m FAIL \x1b[0m ) b.lox boom"
        );
        assert_eq!(
            reporter.render(&TestResult::error("c.lox", "boom")),
            "( \x1b[91mERROR \x1b[0m ) c.lox boom"
        );
        assert_eq!(
            reporter.render(&TestResult::ignored("d.lox")),
            "( \x1b[93mIGNORE\x1b[0m ) d.lox"
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let reporter = Reporter::colored();
        let result = TestResult::error("x.lox", "Timed out");
        assert_eq!(reporter.render(&result), reporter.render(&result));
        // Toggling color is a reporter choice and leaves the result untouched.
        let plain = Reporter::plain().render(&result);
        assert!(!plain.contains('\x1b'));
        assert_eq!(result, TestResult::error("x.lox", "Timed out"));
    }

    #[test]
    fn test_summary_line() {
        let summary = Summary {
            total: 4,
            passed: 1,
            failed: 1,
            errors: 1,
            ignored: 1,
        };
        assert_eq!(
            summary_line(&summary),
            "1 passed, 1 failed, 1 errors, 1 ignored (total 4)"
        );
    }
}

#[cfg(test)]
mod json_report_tests {
    use super::*;

    #[test]
    fn test_json_report_contents() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.json");
        let results = vec![
            TestResult::passed("b.lox").with_duration(Duration::from_millis(12)),
            TestResult::failed("a.lox", "Expected return code 0, got 70"),
        ];

        write_json_report(Path::new("/usr/bin/clox"), &results, &report_path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(value["program"], "/usr/bin/clox");
        assert_eq!(value["total"], 2);
        assert_eq!(value["passed"], 1);
        assert_eq!(value["failed"], 1);
        assert!(value["generated_at"].is_string());

        let entries = value["results"].as_array().unwrap();
        assert_eq!(entries[0]["name"], "a.lox");
        assert_eq!(entries[0]["status"], "FAIL");
        assert_eq!(entries[0]["detail"], "Expected return code 0, got 70");
        assert_eq!(entries[1]["name"], "b.lox");
        assert_eq!(entries[1]["duration_ms"], 12);
        assert!(entries[1]["detail"].is_null());
    }

    #[test]
    fn test_json_report_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("missing").join("report.json");
        let err = write_json_report(Path::new("clox"), &[], &report_path).unwrap_err();
        assert!(err.to_string().contains("Failed to write report"));
    }
}
