//! # Marker Library
//!
//! This module provides the grading engine for source-pattern assignments. It locates the fragment
//! of a source file that belongs to each gradable unit, checks the fragment for required keyword
//! patterns, scores the units against a rubric, and merges stage reports into a final report with
//! feedback.
//!
//! ## Key Concepts
//! - **GradingJob**: Grades one source file against one [`Rubric`].
//! - **Extractors**: Find a unit's fragment by route declaration or comment heading.
//! - **Comparators**: Pluggable strategies for checking a fragment against patterns.
//! - **Merge / Feedback**: Combine stage reports and test results into a [`report::GradeReport`].

pub mod comparators;
pub mod error;
pub mod extractors;
pub mod feedback;
pub mod merge;
pub mod parsers;
pub mod report;
pub mod scorer;
pub mod structure;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::comparators::keyword_comparator::KeywordComparator;
use crate::report::{ApiStageReport, ExercisesReport, PipelinesReport, PlaygroundStageReport};
use crate::traits::comparator::PatternComparator;
use crate::types::{Fragment, GradeResult, UnitStatus};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};
use util::rubric::Rubric;

/// Represents a grading job for a single source file.
///
/// # Fields
/// - `rubric`: Units, patterns, thresholds and point values to grade against.
/// - `comparator`: Strategy for checking fragments against patterns. Defaults to
///   [`KeywordComparator`] configured from the rubric's `sigil_optional` flag.
pub struct GradingJob<'a> {
    rubric: Rubric,
    comparator: Box<dyn PatternComparator + 'a>,
}

impl<'a> GradingJob<'a> {
    /// Create a new grading job for `rubric`.
    pub fn new(rubric: Rubric) -> Self {
        let comparator = KeywordComparator::new(rubric.sigil_optional);
        Self {
            rubric,
            comparator: Box::new(comparator),
        }
    }

    /// Set a custom pattern comparator strategy for this grading job.
    ///
    /// # Arguments
    /// * `comparator` - An implementation of the `PatternComparator` trait.
    pub fn with_comparator<C: PatternComparator + 'a>(mut self, comparator: C) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Grade every unit of the rubric, in rubric order.
    ///
    /// A locator that cannot be built (for example an empty heading) is logged and the unit is
    /// treated as missing; grading never aborts.
    pub fn grade_units(&self, source: &str) -> Vec<GradeResult> {
        self.rubric
            .units
            .iter()
            .map(|unit| {
                let fragment = match extractors::for_locator(&unit.locator) {
                    Ok(extractor) => extractor.extract(source),
                    Err(e) => {
                        warn!(unit = %unit.id, "Invalid locator: {e}");
                        Fragment::Missing
                    }
                };
                let result = scorer::score_unit(
                    unit,
                    self.rubric.threshold_for(unit),
                    &fragment,
                    self.rubric.pending_marker.as_deref(),
                    self.comparator.as_ref(),
                );
                debug!(
                    unit = %result.id,
                    status = ?result.status,
                    found = result.found(),
                    required = result.required,
                    "Graded unit"
                );
                result
            })
            .collect()
    }

    /// Grade `source` as the API stage.
    pub fn grade_api(&self, source: &str) -> ApiStageReport {
        self.api_report(&self.grade_units(source))
    }

    /// Summarise already graded route units.
    pub fn api_report(&self, results: &[GradeResult]) -> ApiStageReport {
        let score = scorer::subtotal(results, self.rubric.max_score);
        let pipelines = PipelinesReport::from_results(results, score, self.rubric.max_score);
        info!(
            rubric = %self.rubric.name,
            implemented = pipelines.implemented,
            total = pipelines.total,
            score,
            "API grading complete"
        );
        ApiStageReport {
            pipelines,
            error: None,
        }
    }

    /// Grade `source` as the playground stage: header structure plus exercises.
    pub fn grade_playground(&self, source: &str) -> PlaygroundStageReport {
        self.playground_report(source, &self.grade_units(source))
    }

    /// Check the header of `source` and summarise already graded exercises.
    pub fn playground_report(&self, source: &str, results: &[GradeResult]) -> PlaygroundStageReport {
        let structure = self
            .rubric
            .structure
            .as_ref()
            .map(|s| structure::check_structure(source, s))
            .unwrap_or_default();
        let score = scorer::subtotal(results, self.rubric.max_score);
        let exercises = ExercisesReport::from_results(results, score, self.rubric.max_score);
        info!(
            rubric = %self.rubric.name,
            structure = structure.score,
            completed = exercises.completed,
            total = exercises.total,
            score,
            "Playground grading complete"
        );
        PlaygroundStageReport {
            structure,
            exercises,
            error: None,
        }
    }

    /// API report for a source that could not be read: every unit missing, `error` set.
    pub fn missing_api_report(&self, error: impl Into<String>) -> ApiStageReport {
        ApiStageReport {
            error: Some(error.into()),
            ..self.grade_api("")
        }
    }

    /// Playground report for a source that could not be read: every check failed, `error` set.
    pub fn missing_playground_report(&self, error: impl Into<String>) -> PlaygroundStageReport {
        PlaygroundStageReport {
            error: Some(error.into()),
            ..self.grade_playground("")
        }
    }
}

/// Count of results per status, in a fixed order, for transcripts and logs.
pub fn status_counts(results: &[GradeResult]) -> [(UnitStatus, usize); 5] {
    [
        UnitStatus::Implemented,
        UnitStatus::Incomplete,
        UnitStatus::Pending,
        UnitStatus::Placeholder,
        UnitStatus::Missing,
    ]
    .map(|status| (status, results.iter().filter(|r| r.status == status).count()))
}

/// Current UTC time as an RFC 3339 timestamp with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::file_loader::load_text;
    use std::path::PathBuf;
    use util::rubric::{GradableUnit, Locator, Pattern};

    fn fixture(name: &str) -> String {
        load_text(&PathBuf::from(format!("src/test_files/sources/{name}"))).unwrap()
    }

    fn single_unit_rubric(patterns: &[&str], threshold: f64) -> Rubric {
        Rubric {
            name: "single".to_string(),
            max_score: 10.0,
            threshold,
            sigil_optional: false,
            pending_marker: Some("TODO".to_string()),
            units: vec![GradableUnit {
                id: "ex".to_string(),
                label: "Exercise".to_string(),
                locator: Locator::Section {
                    heading: "Exercice 1".to_string(),
                },
                patterns: patterns.iter().map(|p| Pattern::from(*p)).collect(),
                points: 10.0,
                threshold: None,
                counted: true,
            }],
            structure: None,
        }
    }

    fn grade_one(rubric: &Rubric, source: &str) -> GradeResult {
        GradingJob::new(rubric.clone()).grade_units(source).remove(0)
    }

    fn is_valid_iso8601(s: &str) -> bool {
        chrono::DateTime::parse_from_rfc3339(s).is_ok()
    }

    #[test]
    fn test_threshold_boundary() {
        let rubric = single_unit_rubric(&["$group", "$addToSet", "$size"], 0.5);
        let only_group = "// Exercice 1 : stats\ndb.r.aggregate([{ $group: { _id: null } }]);\n";
        let result = grade_one(&rubric, only_group);
        assert_eq!(result.status, UnitStatus::Incomplete);
        assert_eq!(result.required, 2);

        let with_size = "// Exercice 1 : stats\ndb.r.aggregate([{ $group: { _id: null } }, { $project: { n: { $size: '$c' } } }]);\n";
        let result = grade_one(&rubric, with_size);
        assert_eq!(result.status, UnitStatus::Implemented);
        assert_eq!(result.awarded, 10.0);
    }

    #[test]
    fn test_todo_only_never_implemented() {
        let rubric = single_unit_rubric(&["$group"], 0.0);
        let result = grade_one(&rubric, "// Exercice 1 : stats\n// TODO\n");
        assert!(!result.completed());
        assert_eq!(result.awarded, 0.0);
    }

    #[test]
    fn test_missing_locator_has_no_matches() {
        let rubric = single_unit_rubric(&["$group", "$sort"], 0.5);
        let result = grade_one(&rubric, "db.r.aggregate([{ $group: {} }, { $sort: {} }]);");
        assert_eq!(result.status, UnitStatus::Missing);
        assert_eq!(result.found(), 0);
    }

    #[test]
    fn test_comment_only_keywords_do_not_count() {
        let rubric = single_unit_rubric(&["$group", "$sort"], 0.5);
        let source = "// Exercice 1 : stats\n// $group then $sort\n/* { $group: {} }, { $sort: {} } */\n";
        let result = grade_one(&rubric, source);
        assert_eq!(result.status, UnitStatus::Placeholder);
        assert_eq!(result.found(), 0);
    }

    #[test]
    fn test_adding_pattern_is_monotone() {
        let rubric = single_unit_rubric(&["$unwind", "$year", "$avg"], 0.6);
        let mut code = String::from("// Exercice 1 : moyenne\ndb.r.aggregate([{ $match: {} }");
        let mut last_found = 0;
        let mut was_implemented = false;
        for stage in [", { $unwind: '$g' }", ", { $avg: 1 }", ", { $year: '$d' }"] {
            code.push_str(stage);
            let result = grade_one(&rubric, &format!("{code}]);\n"));
            assert!(result.found() >= last_found);
            assert!(!(was_implemented && !result.completed()));
            last_found = result.found();
            was_implemented = result.completed();
        }
        assert_eq!(last_found, 3);
        assert!(was_implemented);
    }

    #[test]
    fn test_grading_is_idempotent() {
        let job = GradingJob::new(Rubric::playground_default());
        let source = fixture("playground_partial.js");
        let first = serde_json::to_string_pretty(&job.grade_playground(&source)).unwrap();
        let second = serde_json::to_string_pretty(&job.grade_playground(&source)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_api_complete() {
        let report = GradingJob::new(Rubric::api_default()).grade_api(&fixture("stats_complete.js"));
        let p = &report.pipelines;
        assert_eq!(p.score, 50.0);
        assert_eq!((p.implemented, p.total), (5, 5));
        assert!(p.details.values().all(|v| *v));
        assert_eq!(p.details.len(), 6);
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_api_partial() {
        let job = GradingJob::new(Rubric::api_default());
        let source = fixture("stats_partial.js");
        let results = job.grade_units(&source);
        let statuses: Vec<UnitStatus> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                UnitStatus::Implemented,
                UnitStatus::Implemented,
                UnitStatus::Pending,
                UnitStatus::Missing,
                UnitStatus::Incomplete,
                UnitStatus::Placeholder,
            ]
        );

        let report = job.grade_api(&source);
        assert_eq!(report.pipelines.score, 20.0);
        assert_eq!(report.pipelines.implemented, 2);
        assert_eq!(report.pipelines.details["topCuisines"], false);
    }

    #[test]
    fn test_api_template_scores_zero() {
        let job = GradingJob::new(Rubric::api_default());
        let results = job.grade_units(&fixture("stats_template.js"));
        assert!(results.iter().all(|r| r.status == UnitStatus::Placeholder));
        assert_eq!(job.grade_api(&fixture("stats_template.js")).pipelines.score, 0.0);
    }

    #[test]
    fn test_playground_complete() {
        let report =
            GradingJob::new(Rubric::playground_default()).grade_playground(&fixture("playground_complete.js"));
        assert_eq!(report.structure.score, 5.0);
        assert_eq!(report.exercises.completed, 16);
        assert_eq!(report.exercises.score, 34.5);
        assert_eq!(report.exercises.max_score, 35.0);
    }

    #[test]
    fn test_playground_partial() {
        let job = GradingJob::new(Rubric::playground_default());
        let report = job.grade_playground(&fixture("playground_partial.js"));
        assert_eq!(report.structure.score, 3.0);
        assert_eq!(report.exercises.completed, 7);
        assert_eq!(report.exercises.score, 14.5);

        let details = &report.exercises.details;
        assert_eq!(details[7].status, UnitStatus::Pending);
        assert_eq!(details[8].status, UnitStatus::Incomplete);
        assert_eq!(details[8].missing_patterns, vec!["$addToSet"]);
        assert_eq!(details[9].status, UnitStatus::Missing);
        assert_eq!(details[10].status, UnitStatus::Placeholder);
    }

    #[test]
    fn test_playground_template() {
        let job = GradingJob::new(Rubric::playground_default());
        let results = job.grade_units(&fixture("playground_template.js"));
        assert_eq!(
            status_counts(&results)[3],
            (UnitStatus::Placeholder, 16)
        );
        let report = job.grade_playground(&fixture("playground_template.js"));
        assert_eq!(report.structure.score, 0.0);
        assert_eq!(report.exercises.score, 0.0);
    }

    const QUERY_TODO: &str = "// TODO : Compléter la requête";
    const PIPELINE_TODO: &str = "// TODO : Compléter le pipeline";

    /// Replace the last `marker` in `source` with `code`.
    fn fill_last(source: &str, marker: &str, code: &str) -> String {
        let at = source.rfind(marker).unwrap();
        format!("{}{}{}", &source[..at], code, &source[at + marker.len()..])
    }

    #[test]
    fn test_tp2_layout_untouched() {
        let job = GradingJob::new(Rubric::playground_default());
        let source = fixture("playground_tp2_layout.js");
        let results = job.grade_units(&source);
        assert!(results.iter().all(|r| r.status == UnitStatus::Placeholder));

        let report = job.grade_playground(&source);
        assert_eq!(report.structure.score, 0.0);
        assert_eq!(report.exercises.completed, 0);
    }

    #[test]
    fn test_tp2_layout_only_last_exercise_done() {
        let source = fill_last(
            &fixture("playground_tp2_layout.js"),
            QUERY_TODO,
            r#"db.restaurants.createIndex({ "address.coord": "2dsphere" });
db.restaurants.find({
    "address.coord": { $nearSphere: { $geometry: { type: "Point", coordinates: [-73.965355, 40.782865] } } },
    cuisine: "Italian"
}).limit(5);"#,
        );

        let job = GradingJob::new(Rubric::playground_default());
        let results = job.grade_units(&source);
        let (last, rest) = results.split_last().unwrap();
        assert_eq!(last.id, "exercise16");
        assert_eq!(last.status, UnitStatus::Implemented);
        assert!(rest.iter().all(|r| r.status == UnitStatus::Placeholder));

        let report = job.grade_playground(&source);
        assert_eq!(report.exercises.completed, 1);
        assert_eq!(report.exercises.score, 2.0);
    }

    #[test]
    fn test_tp2_layout_challenge_does_not_leak_into_last_exercise() {
        let source = fill_last(
            &fixture("playground_tp2_layout.js"),
            PIPELINE_TODO,
            r#"db.restaurants.aggregate([{ $facet: { overview: [{ $count: "total" }] } }]);"#,
        );

        let results = GradingJob::new(Rubric::playground_default()).grade_units(&source);
        assert_eq!(results[13].status, UnitStatus::Placeholder);
        assert_eq!(results[15].status, UnitStatus::Placeholder);
    }

    #[test]
    fn test_tp2_layout_ticked_checklist() {
        let source = fixture("playground_tp2_layout.js").replace("// [ ] ", "// [x] ");

        let job = GradingJob::new(Rubric::playground_default());
        let report = job.grade_playground(&source);
        let checklist = report.structure.details.last().unwrap();
        assert!(checklist.passed);
        assert_eq!(checklist.message, "21 items checked");
        assert_eq!(report.structure.score, 1.0);

        assert!(
            report
                .exercises
                .details
                .iter()
                .all(|d| d.status == UnitStatus::Placeholder)
        );
        assert_eq!(report.exercises.score, 0.0);
    }

    #[test]
    fn test_missing_reports_carry_error() {
        let job = GradingJob::new(Rubric::api_default());
        let report = job.missing_api_report("File not found");
        assert_eq!(report.error.as_deref(), Some("File not found"));
        assert_eq!(report.pipelines.score, 0.0);
        assert_eq!(report.pipelines.total, 5);

        let job = GradingJob::new(Rubric::playground_default());
        let report = job.missing_playground_report("File not found");
        assert_eq!(report.structure.score, 0.0);
        assert_eq!(report.exercises.total, 16);
    }

    #[test]
    fn test_custom_comparator() {
        struct Everything;
        impl PatternComparator for Everything {
            fn compare(&self, patterns: &[Pattern], _code: &str) -> types::PatternMatch {
                types::PatternMatch {
                    matched: patterns.iter().map(ToString::to_string).collect(),
                    missed: Vec::new(),
                }
            }
        }
        let rubric = single_unit_rubric(&["$lookup"], 1.0);
        let job = GradingJob::new(rubric).with_comparator(Everything);
        let results = job.grade_units("// Exercice 1 : join\ndb.r.find({});\n");
        assert!(results[0].completed());
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        assert!(is_valid_iso8601(&timestamp_now()));
    }
}
