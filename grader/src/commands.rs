use anyhow::{Context, Result, anyhow};
use marker::GradingJob;
use marker::feedback::rule_feedback::RuleFeedback;
use marker::merge::{Stage, merge};
use marker::parsers::test_log_parser::TestLogParser;
use marker::report::{ApiStageReport, GradeReport, PlaygroundStageReport};
use marker::types::GradeResult;
use marker::utilities::file_loader::{load_stage_input, load_text, write_json_report};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use util::paths::{self, GRADE_REPORT_FILE};
use util::rubric::{Rubric, load_rubric};

/// What a grading command produced.
#[derive(Debug)]
pub struct StageRun<R> {
    pub source: PathBuf,
    /// Per-unit results; empty when the source could not be read.
    pub results: Vec<GradeResult>,
    pub report: R,
    pub out_path: PathBuf,
}

#[derive(Debug)]
pub struct ReportRun {
    pub report: GradeReport,
    pub out_path: PathBuf,
}

fn resolve_rubric(path: Option<&Path>, default: fn() -> Rubric) -> Result<Rubric> {
    match path {
        Some(p) => {
            let rubric = load_rubric(p)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("Failed to load rubric {}", p.display()))?;
            info!("Using rubric '{}' from {}", rubric.name, p.display());
            Ok(rubric)
        }
        None => Ok(default()),
    }
}

/// Grade the route pipelines of `file` and write `api-report.json`.
///
/// An unreadable source still produces a report (all zero, `error` set). Only an unreadable
/// `rubric` or a failed write is an error.
pub fn grade_api(
    file: &Path,
    rubric: Option<&Path>,
    out: Option<&Path>,
) -> Result<StageRun<ApiStageReport>> {
    let job = GradingJob::new(resolve_rubric(rubric, Rubric::api_default)?);
    info!("Grading API pipelines in {}", file.display());

    let (results, report) = match load_text(file) {
        Ok(source) => {
            let results = job.grade_units(&source);
            let report = job.api_report(&results);
            (results, report)
        }
        Err(e) => {
            warn!("Cannot grade {}: {}", file.display(), e);
            (Vec::new(), job.missing_api_report(e.to_string()))
        }
    };

    let out_path = out.map(Path::to_path_buf).unwrap_or_else(paths::api_report_path);
    write_json_report(&out_path, &report)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    info!("API report written to {}", out_path.display());

    Ok(StageRun {
        source: file.to_path_buf(),
        results,
        report,
        out_path,
    })
}

/// Grade the header and exercises of `file` and write `playground-report.json`.
pub fn grade_playground(
    file: &Path,
    rubric: Option<&Path>,
    out: Option<&Path>,
) -> Result<StageRun<PlaygroundStageReport>> {
    let job = GradingJob::new(resolve_rubric(rubric, Rubric::playground_default)?);
    info!("Grading playground {}", file.display());

    let (results, report) = match load_text(file) {
        Ok(source) => {
            let results = job.grade_units(&source);
            let report = job.playground_report(&source, &results);
            (results, report)
        }
        Err(e) => {
            warn!("Cannot grade {}: {}", file.display(), e);
            (Vec::new(), job.missing_playground_report(e.to_string()))
        }
    };

    let out_path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::playground_report_path);
    write_json_report(&out_path, &report)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    info!("Playground report written to {}", out_path.display());

    Ok(StageRun {
        source: file.to_path_buf(),
        results,
        report,
        out_path,
    })
}

/// Merge the stage reports found in `reports_dir` with the test transcript and write
/// `grade-report.json`.
///
/// Defaults: reports are read from the report root, the transcript from `TEST_OUTPUT_PATH`, and
/// the merged report is written next to the stage reports.
pub fn generate_report(
    reports_dir: Option<&Path>,
    test_output: Option<&Path>,
    out: Option<&Path>,
) -> Result<ReportRun> {
    let dir = reports_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::report_root);
    info!("Generating final report from {}", dir.display());

    let stages: BTreeMap<Stage, _> = Stage::ALL
        .into_iter()
        .map(|stage| (stage, load_stage_input(&dir.join(stage.report_file()))))
        .collect();

    let test_path = test_output
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::test_output_path);
    let tests = TestLogParser.load(&test_path);

    let report = merge(&stages, tests, marker::timestamp_now(), &RuleFeedback::default());

    let out_path = match (out, reports_dir) {
        (Some(out), _) => out.to_path_buf(),
        (None, Some(dir)) => dir.join(GRADE_REPORT_FILE),
        (None, None) => paths::grade_report_path(),
    };
    write_json_report(&out_path, &report)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    info!(
        total = report.total_score,
        "Final report written to {}",
        out_path.display()
    );

    Ok(ReportRun { report, out_path })
}
