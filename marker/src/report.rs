//! # Report Module
//!
//! This module defines the serializable reports produced by the grading stages and by the final
//! merge. All reports use camelCase keys so they can be read by the same dashboards that consume
//! the JSON artifacts.
//!
//! ## Overview
//!
//! The main types are:
//! - [`PlaygroundStageReport`]: header structure checks plus per-exercise results.
//! - [`ApiStageReport`]: per-route pipeline results.
//! - [`TestsReport`]: passed/failed counts read from the test runner transcript.
//! - [`GradeReport`]: the merged report with the total score and feedback.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "timestamp": "2026-01-15T10:00:00Z",
//!   "totalScore": 72,
//!   "maxScore": 100,
//!   "playground": {
//!     "structure": { "score": 5.0, "maxScore": 5.0 },
//!     "exercises": { "score": 24.5, "maxScore": 35.0, "completed": 11, "total": 16 }
//!   },
//!   "api": {
//!     "pipelines": { "score": 30.0, "maxScore": 50.0, "implemented": 3, "total": 5,
//!                    "details": { "dashboard": false, "overview": true } }
//!   },
//!   "tests": { "passed": 3, "failed": 2, "total": 5, "score": 6, "maxScore": 10 },
//!   "feedback": ["..."]
//! }
//! ```
//!
//! ## Design Notes
//!
//! - Stage reports carry no timestamp, so regrading an unchanged file writes identical bytes.
//! - Every `Default` is the zero-valued report with the fixed maximum for its section, which is
//!   what the merge substitutes for missing input.

use crate::types::{GradeResult, UnitStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STRUCTURE_MAX: f64 = 5.0;
pub const EXERCISES_MAX: f64 = 35.0;
pub const PIPELINES_MAX: f64 = 50.0;
pub const TESTS_MAX: u32 = 10;
pub const TOTAL_MAX: u32 = 100;

const DEFAULT_EXERCISE_COUNT: usize = 16;
const DEFAULT_PIPELINE_COUNT: usize = 5;

/// One header check of the playground file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureCheck {
    pub check: String,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub score: f64,
    pub max_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<StructureCheck>,
}

impl Default for StructureReport {
    fn default() -> Self {
        Self {
            score: 0.0,
            max_score: STRUCTURE_MAX,
            details: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDetail {
    pub exercise: String,
    pub name: String,
    pub status: UnitStatus,
    pub completed: bool,
    pub patterns_found: usize,
    pub patterns_expected: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesReport {
    pub score: f64,
    pub max_score: f64,
    pub completed: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ExerciseDetail>,
}

impl Default for ExercisesReport {
    fn default() -> Self {
        Self {
            score: 0.0,
            max_score: EXERCISES_MAX,
            completed: 0,
            total: DEFAULT_EXERCISE_COUNT,
            details: Vec::new(),
        }
    }
}

impl ExercisesReport {
    /// Summarise graded exercises. `score` is the already-capped subtotal.
    pub fn from_results(results: &[GradeResult], score: f64, max_score: f64) -> Self {
        let details = results
            .iter()
            .map(|r| ExerciseDetail {
                exercise: r.id.clone(),
                name: r.label.clone(),
                status: r.status,
                completed: r.completed(),
                patterns_found: r.found(),
                patterns_expected: r.expected(),
                missing_patterns: r.missed_patterns.clone(),
            })
            .collect();

        Self {
            score,
            max_score,
            completed: results.iter().filter(|r| r.counted && r.completed()).count(),
            total: results.iter().filter(|r| r.counted).count(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinesReport {
    pub score: f64,
    pub max_score: f64,
    pub implemented: usize,
    pub total: usize,
    /// Unit id to implemented flag, bonus units included.
    #[serde(default)]
    pub details: BTreeMap<String, bool>,
}

impl Default for PipelinesReport {
    fn default() -> Self {
        Self {
            score: 0.0,
            max_score: PIPELINES_MAX,
            implemented: 0,
            total: DEFAULT_PIPELINE_COUNT,
            details: BTreeMap::new(),
        }
    }
}

impl PipelinesReport {
    /// Summarise graded routes. `score` is the already-capped subtotal.
    pub fn from_results(results: &[GradeResult], score: f64, max_score: f64) -> Self {
        Self {
            score,
            max_score,
            implemented: results.iter().filter(|r| r.counted && r.completed()).count(),
            total: results.iter().filter(|r| r.counted).count(),
            details: results
                .iter()
                .map(|r| (r.id.clone(), r.completed()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestsReport {
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
    pub score: u32,
    pub max_score: u32,
}

impl Default for TestsReport {
    fn default() -> Self {
        Self {
            passed: 0,
            failed: 0,
            total: 0,
            score: 0,
            max_score: TESTS_MAX,
        }
    }
}

impl TestsReport {
    /// Build the summary from counts: `score = round(passed / total * max)`, 0 when nothing ran.
    pub fn from_counts(passed: u32, failed: u32) -> Self {
        let total = passed + failed;
        let score = if total > 0 {
            (passed as f64 / total as f64 * TESTS_MAX as f64).round() as u32
        } else {
            0
        };
        Self {
            passed,
            failed,
            total,
            score,
            max_score: TESTS_MAX,
        }
    }
}

/// Contents of `api-report.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStageReport {
    pub pipelines: PipelinesReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Contents of `playground-report.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundStageReport {
    pub structure: StructureReport,
    pub exercises: ExercisesReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundSection {
    pub structure: StructureReport,
    pub exercises: ExercisesReport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    pub pipelines: PipelinesReport,
}

/// Contents of `grade-report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub timestamp: String,
    pub total_score: u32,
    pub max_score: u32,
    pub playground: PlaygroundSection,
    pub api: ApiSection,
    pub tests: TestsReport,
    pub feedback: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(id: &str, status: UnitStatus, awarded: f64, counted: bool) -> GradeResult {
        GradeResult {
            id: id.to_string(),
            label: id.to_string(),
            status,
            matched_patterns: vec!["$group".to_string()],
            missed_patterns: vec!["$sort".to_string()],
            required: 1,
            awarded,
            counted,
        }
    }

    #[test]
    fn test_defaults_carry_fixed_maxima() {
        assert_eq!(StructureReport::default().max_score, 5.0);
        assert_eq!(ExercisesReport::default().total, 16);
        assert_eq!(PipelinesReport::default().max_score, 50.0);
        assert_eq!(TestsReport::default().max_score, 10);
    }

    #[test]
    fn test_tests_report_from_counts() {
        assert_eq!(TestsReport::from_counts(8, 0).score, 10);
        assert_eq!(TestsReport::from_counts(3, 2).score, 6);
        assert_eq!(TestsReport::from_counts(0, 0), TestsReport::default());
        assert_eq!(TestsReport::from_counts(1, 2).score, 3);
    }

    #[test]
    fn test_pipelines_from_results_skips_bonus_in_counts() {
        let results = vec![
            result("overview", UnitStatus::Implemented, 10.0, true),
            result("parQuartier", UnitStatus::Incomplete, 0.0, true),
            result("dashboard", UnitStatus::Implemented, 0.0, false),
        ];
        let report = PipelinesReport::from_results(&results, 10.0, 50.0);
        assert_eq!(report.implemented, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.details.len(), 3);
        assert_eq!(report.details["dashboard"], true);
        assert_eq!(report.details["parQuartier"], false);
    }

    #[test]
    fn test_camel_case_keys() {
        let report = ApiStageReport::default();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "pipelines": { "score": 0.0, "maxScore": 50.0, "implemented": 0, "total": 5, "details": {} }
            })
        );

        let detail = ExercisesReport::from_results(
            &[result("exercise1", UnitStatus::Pending, 0.0, true)],
            0.0,
            35.0,
        );
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["details"][0]["patternsFound"], 1);
        assert_eq!(value["details"][0]["patternsExpected"], 2);
        assert_eq!(value["details"][0]["status"], "pending");
        assert_eq!(value["details"][0]["missingPatterns"][0], "$sort");
    }

    #[test]
    fn test_stage_report_accepts_minimal_json() {
        let report: PlaygroundStageReport = serde_json::from_value(json!({
            "structure": { "score": 3, "maxScore": 5 },
            "exercises": { "score": 10.5, "maxScore": 35, "completed": 5, "total": 16 }
        }))
        .unwrap();
        assert_eq!(report.structure.score, 3.0);
        assert!(report.exercises.details.is_empty());
        assert_eq!(report.error, None);
    }
}
