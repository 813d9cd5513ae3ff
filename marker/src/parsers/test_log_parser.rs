//! Test Runner Transcript Parser
//!
//! Reads the pass/fail summary printed by vitest-style runners, for example
//!
//! ```text
//!  Test Files  1 passed (1)
//!       Tests  3 passed, 2 failed (5)
//! ```
//!
//! The first line matching `Tests <n> passed|failed` is the summary line. Within that line
//! `<n> passed` and `<n> failed` are read independently; either may be absent and then counts as
//! zero. ANSI colour codes are removed first. A transcript without a summary line yields zeros.
//!
//! Counts are never taken from other lines. Per-file lines such as `Test Files  1 failed (1)` or
//! a stray `3 failed` in a stack trace are ignored, so a runner that prints `passed` and `failed`
//! on separate lines reports only what its summary line carries.

use crate::error::MarkerError;
use crate::report::TestsReport;
use crate::traits::parser::Parser;
use crate::utilities::file_loader::load_text;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{info, warn};

static ANSI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ansi regex is valid"));
static SUMMARY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bTests?\s+\d+\s+(?:passed|failed)").expect("summary regex is valid")
});
static PASSED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+passed").expect("passed regex is valid"));
static FAILED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+failed").expect("failed regex is valid"));

/// Parser for test runner transcripts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestLogParser;

fn count(re: &Regex, line: &str) -> u32 {
    re.captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

impl<'a> Parser<&'a str, TestsReport> for TestLogParser {
    fn parse(&self, raw: &'a str) -> Result<TestsReport, MarkerError> {
        let clean = ANSI.replace_all(raw, "");
        let Some(line) = clean.lines().find(|l| SUMMARY_LINE.is_match(l)) else {
            return Ok(TestsReport::default());
        };
        Ok(TestsReport::from_counts(
            count(&PASSED, line),
            count(&FAILED, line),
        ))
    }
}

impl TestLogParser {
    /// Read and parse the transcript at `path`. A missing or unreadable transcript yields zeros.
    pub fn load(&self, path: &Path) -> TestsReport {
        let raw = match load_text(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("No test output at {}: {}", path.display(), e);
                return TestsReport::default();
            }
        };
        match self.parse(raw.as_str()) {
            Ok(report) => {
                info!(
                    passed = report.passed,
                    failed = report.failed,
                    "Parsed test results"
                );
                report
            }
            Err(e) => {
                warn!("Could not parse test output {}: {}", path.display(), e);
                TestsReport::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_all_passed() {
        let report = TestLogParser.parse("Tests  8 passed (8)").unwrap();
        assert_eq!(
            report,
            TestsReport {
                passed: 8,
                failed: 0,
                total: 8,
                score: 10,
                max_score: 10
            }
        );
    }

    #[test]
    fn test_passed_and_failed() {
        let report = TestLogParser.parse("Tests  3 passed, 2 failed (5)").unwrap();
        assert_eq!((report.passed, report.failed, report.total), (3, 2, 5));
        assert_eq!(report.score, 6);
    }

    #[test]
    fn test_vitest_failed_first() {
        let report = TestLogParser.parse("      Tests  2 failed | 3 passed (5)").unwrap();
        assert_eq!((report.passed, report.failed, report.total), (3, 2, 5));
    }

    #[test]
    fn test_skips_test_files_line() {
        let log = " Test Files  1 passed (1)\n      Tests  4 passed | 1 failed (5)\n";
        let report = TestLogParser.parse(log).unwrap();
        assert_eq!((report.passed, report.failed), (4, 1));
        assert_eq!(report.score, 8);
    }

    #[test]
    fn test_counts_come_from_summary_line_only() {
        let log = "\
 Test Files  1 failed | 1 passed (2)
      Tests  6 passed (6)
 FAIL  tests/api.test.js > 2 failed assertions
";
        let report = TestLogParser.parse(log).unwrap();
        assert_eq!((report.passed, report.failed, report.total), (6, 0, 6));
        assert_eq!(report.score, 10);
    }

    #[test]
    fn test_ansi_codes_are_ignored() {
        let log = "\x1b[2m      Tests \x1b[22m \x1b[1m\x1b[32m5 passed\x1b[39m\x1b[22m\x1b[90m (5)\x1b[39m";
        let report = TestLogParser.parse(log).unwrap();
        assert_eq!(report.passed, 5);
        assert_eq!(report.score, 10);
    }

    #[test]
    fn test_no_summary_yields_zeros() {
        let report = TestLogParser.parse("npm ERR! missing script: test").unwrap();
        assert_eq!(report, TestsReport::default());
    }

    #[test]
    fn test_load_fixture() {
        let report = TestLogParser.load(&PathBuf::from("src/test_files/test_logs/vitest_mixed.txt"));
        assert_eq!((report.passed, report.failed, report.total), (3, 2, 5));
    }

    #[test]
    fn test_load_missing_file() {
        let report = TestLogParser.load(&PathBuf::from("src/test_files/test_logs/nope.txt"));
        assert_eq!(report, TestsReport::default());
    }
}
